use crate::lexer::Token;

use super::Literal;

/// An expression tree node. Every non-leaf node exclusively owns its
/// children, so the tree is dropped recursively with the root.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assign(Token, Box<Expr>),
    Binary(Box<Expr>, Token, Box<Expr>),
    Grouping(Box<Expr>),
    Literal(Literal),
    Unary(Token, Box<Expr>),
    Var(Token),
}

pub trait ExprVisitor<T> {
    fn visit_expr(&mut self, expr: &Expr) -> T {
        match expr {
            Expr::Assign(name, value) => self.visit_assign(name, value),
            Expr::Binary(left, op, right) => self.visit_binary(left, op, right),
            Expr::Grouping(inner) => self.visit_grouping(inner),
            Expr::Literal(value) => self.visit_literal(value),
            Expr::Unary(op, operand) => self.visit_unary(op, operand),
            Expr::Var(name) => self.visit_var_ref(name),
        }
    }

    fn visit_assign(&mut self, name: &Token, value: &Expr) -> T;

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> T;

    fn visit_grouping(&mut self, inner: &Expr) -> T;

    fn visit_literal(&mut self, value: &Literal) -> T;

    fn visit_unary(&mut self, op: &Token, operand: &Expr) -> T;

    fn visit_var_ref(&mut self, name: &Token) -> T;
}
