//! Evaluation environment.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lox_lexer::Token;

use crate::{RuntimeError, Value};

/// A handle to one frame of variable bindings.
///
/// Cloning the handle shares the frame: a closure that captured it sees
/// later definitions and assignments made through any other handle.
#[derive(Clone, Default)]
pub struct Environment {
    frame: Rc<Frame>,
}

#[derive(Default)]
struct Frame {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Environment>,
}

impl Environment {
    /// Create a new empty root environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child environment.
    pub fn child(&self) -> Self {
        Self {
            frame: Rc::new(Frame {
                bindings: RefCell::new(HashMap::new()),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Define a variable in the current scope, replacing any existing
    /// binding of the same name in this frame.
    pub fn define(&self, name: &str, value: Value) {
        self.frame
            .bindings
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    /// Look up a variable, innermost frame first.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })
    }

    /// Update the nearest existing binding. Never creates one.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let mut env = self;
        loop {
            if let Some(slot) = env.frame.bindings.borrow_mut().get_mut(&name.lexeme) {
                *slot = value;
                return Ok(());
            }
            match &env.frame.parent {
                Some(parent) => env = parent,
                None => return Err(RuntimeError::UndefinedVariable { name: name.clone() }),
            }
        }
    }

    /// Look up a variable by plain name.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.frame.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.frame.parent.as_ref()?.lookup(name)
    }

    /// Names bound in this frame (not including parents), sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frame.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether both handles point at the same frame.
    pub fn same_frame(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}
