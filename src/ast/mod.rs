mod expr;
mod parser;
pub mod printer;
mod stmt;
mod value;

pub use expr::{Expr, ExprVisitor};
pub use parser::Parser;
pub use stmt::{Stmt, StmtVisitor};
pub use value::Literal;
