use crate::lexer::Token;

use super::{Expr, ExprVisitor, Literal, Stmt, StmtVisitor};

/// Debug visitor which renders the tree as parenthesized prefix forms.
/// Rendering never evaluates anything and never mutates state.
pub struct AstPrinter {}

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign(&mut self, name: &Token, value: &Expr) -> String {
        format!("(= {} {})", name.lexeme(), self.visit_expr(value))
    }

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> String {
        format!("({} {} {})", op.lexeme(), self.visit_expr(left), self.visit_expr(right))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        format!("(group {})", self.visit_expr(inner))
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        match value {
            Literal::String(s) => format!("\"{}\"", s),
            value => value.to_string(),
        }
    }

    fn visit_unary(&mut self, op: &Token, operand: &Expr) -> String {
        format!("({} {})", op.lexeme(), self.visit_expr(operand))
    }

    fn visit_var_ref(&mut self, name: &Token) -> String {
        name.lexeme().to_string()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_block(&mut self, stmts: &[Stmt]) -> String {
        let mut result = String::new();
        result.push_str("(block");
        for stmt in stmts {
            result.push(' ');
            result.push_str(&self.visit_stmt(stmt));
        }
        result.push(')');
        result
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) -> String {
        format!("({})", self.visit_expr(expr))
    }

    fn visit_print(&mut self, expr: &Expr) -> String {
        format!("(print {})", self.visit_expr(expr))
    }

    fn visit_var_def(&mut self, name: &Token, init: &Expr) -> String {
        format!("(var {} {})", name.lexeme(), self.visit_expr(init))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::TokenType;

    use super::*;

    #[test]
    fn test_ast_printer() {
        let expr = Expr::Binary(
            Box::new(Expr::Unary(
                Token::new(TokenType::Minus, "-", 1, 1),
                Box::new(Expr::Literal(Literal::Number(123.))),
            )),
            Token::new(TokenType::Star, "*", 1, 7),
            Box::new(Expr::Grouping(Box::new(Expr::Literal(Literal::Number(45.67))))),
        );

        let mut printer = AstPrinter {};
        assert_eq!(printer.visit_expr(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_string_literals_are_quoted() {
        let expr = Expr::Literal(Literal::String("abc".to_string()));
        assert_eq!(AstPrinter {}.visit_expr(&expr), "\"abc\"");
    }
}
