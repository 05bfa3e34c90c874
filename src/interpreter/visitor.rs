use std::io::Write;

use crate::{
    ast::{Expr, ExprVisitor, Literal, Stmt, StmtVisitor},
    errors,
    lexer::{Token, TokenType},
    LoxError,
};

use super::{value::EPSILON, Interpreter, Value};

impl Interpreter {
    fn number_operands(&self, op: &Token, left: Value, right: Value) -> Result<(f64, f64), LoxError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((a, b)),
            _ => Err(errors::runtime(
                op.location(),
                "Operands must be numbers.",
                &format!("Make sure that both operands of `{}` evaluate to numbers.", op.lexeme()),
            )),
        }
    }

    fn add(&self, op: &Token, left: Value, right: Value) -> Result<Value, LoxError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            (Value::String(a), Value::Number(b)) if self.coerce_concat => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            (Value::Number(a), Value::String(b)) if self.coerce_concat => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            _ => Err(errors::runtime(
                op.location(),
                "Operands must either be a number or a string.",
                "Make sure that both operands of `+` evaluate to numbers or strings.",
            )),
        }
    }
}

impl ExprVisitor<Result<Value, LoxError>> for Interpreter {
    fn visit_assign(&mut self, name: &Token, value: &Expr) -> Result<Value, LoxError> {
        let value = self.visit_expr(value)?;
        self.env.assign(name, value.clone())?;
        Ok(value)
    }

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, LoxError> {
        // Both operands are evaluated, left first, before the operator is
        // even looked at. There is no short-circuiting at this level.
        let left = self.visit_expr(left)?;
        let right = self.visit_expr(right)?;

        match op.ty() {
            TokenType::EqualEqual => Ok(Value::Bool(left.loose_eq(&right))),
            TokenType::BangEqual => Ok(Value::Bool(!left.loose_eq(&right))),
            TokenType::Greater => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Bool(a > b))
            }
            TokenType::GreaterEqual => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Bool(a >= b))
            }
            TokenType::Less => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Bool(a < b))
            }
            TokenType::LessEqual => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Bool(a <= b))
            }
            TokenType::Plus => self.add(op, left, right),
            TokenType::Minus => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Number(a - b))
            }
            TokenType::Star => {
                let (a, b) = self.number_operands(op, left, right)?;
                Ok(Value::Number(a * b))
            }
            TokenType::Slash => {
                let (a, b) = self.number_operands(op, left, right)?;
                if b.abs() < EPSILON {
                    Err(errors::runtime(
                        op.location(),
                        "Division by zero.",
                        "Make sure that the divisor is not zero before dividing by it.",
                    ))
                } else {
                    Ok(Value::Number(a / b))
                }
            }
            TokenType::Mod => {
                let (a, b) = self.number_operands(op, left, right)?;
                if b.abs() < EPSILON {
                    Err(errors::runtime(
                        op.location(),
                        "Modulo by zero.",
                        "Make sure that the divisor is not zero before taking the remainder.",
                    ))
                } else {
                    Ok(Value::Number(a % b))
                }
            }
            _ => Err(errors::runtime(
                op.location(),
                &format!("Unsupported binary operator '{}'.", op.lexeme()),
                "This operator cannot be applied to a pair of values.",
            )),
        }
    }

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Value, LoxError> {
        self.visit_expr(inner)
    }

    fn visit_literal(&mut self, value: &Literal) -> Result<Value, LoxError> {
        Ok(value.into())
    }

    fn visit_unary(&mut self, op: &Token, operand: &Expr) -> Result<Value, LoxError> {
        let operand = self.visit_expr(operand)?;

        match op.ty() {
            TokenType::Minus => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(errors::runtime(
                    op.location(),
                    "Operand must be a number.",
                    "Make sure that the operand of the unary `-` evaluates to a number.",
                )),
            },
            TokenType::Bang => Ok(Value::Bool(!operand.is_truthy())),
            _ => Err(errors::runtime(
                op.location(),
                &format!("Unsupported unary operator '{}'.", op.lexeme()),
                "This operator cannot be applied to a single value.",
            )),
        }
    }

    fn visit_var_ref(&mut self, name: &Token) -> Result<Value, LoxError> {
        self.env.get(name.lexeme()).ok_or_else(|| {
            errors::runtime(
                name.location(),
                &format!("Undefined variable '{}'.", name.lexeme()),
                &format!("Declare the variable first using `var {} = ...;`.", name.lexeme()),
            )
        })
    }
}

impl StmtVisitor<Result<Value, LoxError>> for Interpreter {
    fn visit_block(&mut self, stmts: &[Stmt]) -> Result<Value, LoxError> {
        let parent = self.env.clone();
        self.env = parent.enclose();

        let mut result = Ok(Value::Nil);
        for stmt in stmts {
            result = self.visit_stmt(stmt);
            if result.is_err() {
                break;
            }
        }

        // The block scope is torn down even when a statement failed.
        self.env = parent;
        result
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) -> Result<Value, LoxError> {
        self.visit_expr(expr)?;
        Ok(Value::Nil)
    }

    fn visit_print(&mut self, expr: &Expr) -> Result<Value, LoxError> {
        let value = self.visit_expr(expr)?;
        writeln!(self.output, "{}", value)?;
        Ok(Value::Nil)
    }

    fn visit_var_def(&mut self, name: &Token, init: &Expr) -> Result<Value, LoxError> {
        let value = self.visit_expr(init)?;
        self.env.define(name.lexeme(), value);
        Ok(Value::Nil)
    }
}
