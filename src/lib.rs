mod core;
pub mod ast;
pub mod cmdline;
pub mod interpreter;
pub mod lexer;

pub use crate::core::errors::{self, LoxError};
pub use crate::core::CaptureOutput;
