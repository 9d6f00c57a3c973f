//! The calling convention shared by functions, classes and natives.

use crate::{Interpreter, RuntimeError, Value};

/// Something that can appear on the left of `(...)`.
///
/// The interpreter checks the argument count against `arity` before
/// calling, so implementations can rely on it.
pub trait Callable {
    fn arity(&self) -> usize;

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError>;
}

type NativeBody = dyn Fn(&[Value]) -> Result<Value, String>;

/// A function implemented by the host.
pub struct NativeFn {
    name: String,
    arity: usize,
    func: Box<NativeBody>,
}

impl NativeFn {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Callable for NativeFn {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.func)(&arguments).map_err(|message| RuntimeError::Native {
            name: self.name.clone(),
            message,
        })
    }
}
