//! Interpreter for Lox.
//!
//! This crate implements a tree-walking interpreter over the AST produced
//! by `lox-parser`. Variables live in chained, shared environments; there is
//! no static resolution pass, so every lookup walks the chain by name.

mod callable;
mod class;
mod env;
mod error;
mod function;
mod interpreter;
mod natives;
mod output;
pub mod value;

pub use callable::{Callable, NativeFn};
pub use class::{Class, Instance};
pub use env::Environment;
pub use error::RuntimeError;
pub use function::Function;
pub use interpreter::{Completion, Interpreter};
pub use output::OutputBuffer;
pub use value::Value;
