use std::{cell::RefCell, rc::Rc};

use fnv::FnvHashMap;

use crate::{errors, lexer::Token, LoxError};

use super::Value;

/// A handle onto one scope in the lexical scope chain. Cloning the handle
/// shares the scope; `enclose` creates a child whose parent link is used for
/// lookup chaining only. Dropping the last handle onto a scope discards its
/// bindings, which is how leaving a block tears the scope down.
#[derive(Clone, Debug, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

#[derive(Debug, Default)]
struct Scope {
    values: FnvHashMap<String, Value>,
    parent: Option<Rc<RefCell<Scope>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enclose(&self) -> Environment {
        Environment(Rc::new(RefCell::new(Scope {
            values: FnvHashMap::default(),
            parent: Some(Rc::clone(&self.0)),
        })))
    }

    /// Creates or overwrites a binding in this scope only, shadowing any
    /// outer binding of the same name.
    pub fn define<K: Into<String>>(&self, key: K, value: Value) {
        self.0.borrow_mut().values.insert(key.into(), value);
    }

    /// Looks the name up from this scope outward to the global scope.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key)
    }

    /// Overwrites the binding in the nearest scope which already has one.
    /// Assigning to a name no scope defines is an error and never creates a
    /// binding.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), LoxError> {
        if self.0.borrow_mut().assign(name.lexeme(), value) {
            Ok(())
        } else {
            Err(errors::runtime(
                name.location(),
                &format!("Undefined variable '{}'.", name.lexeme()),
                &format!("Declare the variable first using `var {} = ...;`.", name.lexeme()),
            ))
        }
    }
}

impl Scope {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.parent.as_ref().and_then(|p| p.borrow().get(key)))
    }

    fn assign(&mut self, key: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(key) {
            *slot = value;
            true
        } else if let Some(parent) = &self.parent {
            parent.borrow_mut().assign(key, value)
        } else {
            false
        }
    }
}
