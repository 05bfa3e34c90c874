use std::fmt::Display;

use crate::ast::Literal;

/// Tolerance used for numeric comparisons: two numbers are equal when their
/// difference is within `EPSILON` scaled by the sum of their magnitudes, and
/// a divisor this close to zero is a runtime error rather than an infinity.
pub const EPSILON: f64 = 1e-6;

/// A runtime value. Strings are always owned, whether they came from a
/// source literal or a concatenation, so there is exactly one ownership
/// discipline to get right.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Equality as the language defines it: `nil` equals only `nil`,
    /// cross-type comparisons are always false, strings compare
    /// byte-for-byte, and numbers compare with the relative tolerance
    /// described on [`EPSILON`].
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a - b).abs() <= EPSILON * (a.abs() + b.abs()),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
    }

    #[test]
    fn test_loose_eq_tolerates_float_error() {
        assert!(Value::Number(0.1 + 0.2).loose_eq(&Value::Number(0.3)));
        assert!(!Value::Number(1.0).loose_eq(&Value::Number(2.0)));
    }

    #[test]
    fn test_loose_eq_never_crosses_types() {
        assert!(!Value::String("1".to_string()).loose_eq(&Value::Number(1.0)));
        assert!(!Value::Bool(true).loose_eq(&Value::Number(1.0)));
        assert!(!Value::Nil.loose_eq(&Value::Bool(false)));
        assert!(Value::Nil.loose_eq(&Value::Nil));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(Value::String("abc".to_string()).to_string(), "abc");
    }
}
