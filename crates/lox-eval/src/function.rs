//! User-defined functions and methods.

use std::cell::RefCell;
use std::rc::Rc;

use lox_syntax::FunctionDecl;
use tracing::debug;

use crate::{Callable, Completion, Environment, Instance, Interpreter, RuntimeError, Value};

/// A function closed over the environment it was declared in.
pub struct Function {
    decl: Rc<FunctionDecl>,
    closure: Environment,
    is_initializer: bool,
}

impl Function {
    pub fn new(decl: Rc<FunctionDecl>, closure: Environment, is_initializer: bool) -> Self {
        Self {
            decl,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name.lexeme
    }

    /// Produce a method bound to `instance`: same declaration, with a new
    /// frame between it and its closure that defines `this`.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let env = self.closure.child();
        env.define("this", Value::Instance(instance));
        Function {
            decl: Rc::clone(&self.decl),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.decl.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        debug!(function = %self.name(), args = arguments.len(), "call");

        let env = self.closure.child();
        for (param, argument) in self.decl.params.iter().zip(arguments) {
            env.define(&param.lexeme, argument);
        }

        let completion = interpreter.execute_block(&self.decl.body, env)?;

        // `init` always hands back the instance, whatever it returned.
        if self.is_initializer {
            return Ok(self.closure.lookup("this").unwrap_or(Value::Nil));
        }

        match completion {
            Completion::Return(value) => Ok(value),
            Completion::Normal => Ok(Value::Nil),
        }
    }
}
