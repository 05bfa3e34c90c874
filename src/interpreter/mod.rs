mod env;
mod inter;
mod value;
mod visitor;

pub use env::Environment;
pub use inter::Interpreter;
pub use value::Value;

use crate::{ast::Stmt, LoxError};

/// Runs the given statements against a fresh interpreter writing to stdout.
pub fn interpret(stmts: &[Stmt]) -> Vec<LoxError> {
    let mut interpreter = Interpreter::default();
    interpreter.interpret(stmts)
}
