//! The `lox run` command.

use std::fs;

use lox_eval::Interpreter;
use tracing::debug;

use crate::{CliError, Context};

pub fn run(file: &str, ctx: &Context) -> Result<(), CliError> {
    let source = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_string(),
        source,
    })?;
    debug!(file, bytes = source.len(), "loaded script");

    let mut interpreter = Interpreter::new();
    super::execute_source(&mut interpreter, &source, file, false, ctx)
}
