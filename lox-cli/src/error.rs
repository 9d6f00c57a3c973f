//! CLI errors and their exit codes.

use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Lex or parse errors; the diagnostics were already printed.
    #[error("could not run due to {0} syntax error(s)")]
    Syntax(usize),

    /// A runtime error; already printed.
    #[error("runtime error")]
    Runtime,

    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}

impl CliError {
    /// Process exit code, following the BSD `sysexits` convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_DATAERR
            CliError::Syntax(_) => 65,
            // EX_SOFTWARE
            CliError::Runtime => 70,
            // EX_IOERR
            CliError::Read { .. } | CliError::Readline(_) => 74,
        }
    }

    /// Whether the details have already been shown to the user.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Runtime)
    }
}
