use std::io::Write;

use crate::{
    ast::{Stmt, StmtVisitor},
    LoxError,
};

use super::Environment;

/// Walks the tree directly, evaluating as it goes. The interpreter owns the
/// global environment, so a single instance can run many compilation units
/// in sequence and later units will see bindings made by earlier ones.
pub struct Interpreter {
    pub(super) env: Environment,
    pub(super) coerce_concat: bool,
    pub(super) output: Box<dyn Write>,
}

impl Interpreter {
    /// Runs each top-level statement in order. A runtime error abandons the
    /// statement which raised it but not the ones which follow, so every
    /// error the program would hit is reported in one run.
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Vec<LoxError> {
        let mut errs = Vec::new();

        for stmt in stmts {
            if let Err(err) = self.visit_stmt(stmt) {
                errs.push(err);
            }
        }

        errs
    }

    pub fn with_output(self, output: Box<dyn Write>) -> Self {
        Self { output, ..self }
    }

    /// Disables the coercion of numbers into strings when the other operand
    /// of `+` is a string.
    pub fn with_strict_concat(self) -> Self {
        Self {
            coerce_concat: false,
            ..self
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            env: Environment::new(),
            coerce_concat: true,
            output: Box::new(std::io::stdout()),
        }
    }
}
