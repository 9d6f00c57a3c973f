//! The `lox eval` command.

use lox_eval::Interpreter;

use crate::{CliError, Context};

/// Evaluate source text. A lone expression statement prints its value,
/// so `lox eval "1 + 2;"` shows `3`.
pub fn run(source: &str, ctx: &Context) -> Result<(), CliError> {
    let mut interpreter = Interpreter::new();
    super::execute_source(&mut interpreter, source, "<eval>", true, ctx)
}
