use crate::lexer::Token;

use super::{Expr, ExprVisitor};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Expression(Expr),
    Print(Expr),
    Var(Token, Expr),
}

pub trait StmtVisitor<T>: ExprVisitor<T> {
    fn visit_stmt(&mut self, stmt: &Stmt) -> T {
        match stmt {
            Stmt::Block(stmts) => self.visit_block(stmts),
            Stmt::Expression(expr) => self.visit_expr_stmt(expr),
            Stmt::Print(expr) => self.visit_print(expr),
            Stmt::Var(name, init) => self.visit_var_def(name, init),
        }
    }

    fn visit_block(&mut self, stmts: &[Stmt]) -> T;

    fn visit_expr_stmt(&mut self, expr: &Expr) -> T;

    fn visit_print(&mut self, expr: &Expr) -> T;

    fn visit_var_def(&mut self, name: &Token, init: &Expr) -> T;
}
