//! CLI command implementations.

pub mod check;
pub mod eval;
pub mod repl;
pub mod run;

use lox_diagnostic::{Diagnostic, emit};
use lox_eval::{Interpreter, RuntimeError};
use lox_syntax::Stmt;

use crate::{CliError, Context, output};

/// Print diagnostics, rich by default and one line each in quiet mode.
pub(crate) fn report_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic], ctx: &Context) {
    for diag in diagnostics {
        if ctx.quiet || emit(source, filename, diag, &ctx.report).is_err() {
            eprintln!("{}", diag);
        }
    }
}

pub(crate) fn report_runtime_error(source: &str, filename: &str, err: &RuntimeError, ctx: &Context) {
    if ctx.quiet || err.token().is_none() {
        eprintln!("{}", err.report());
        return;
    }
    let diag = err.to_diagnostic();
    if emit(source, filename, &diag, &ctx.report).is_err() {
        eprintln!("{}", err.report());
    }
}

/// Parse `source`, reporting any syntax errors.
pub(crate) fn parse_source(source: &str, filename: &str, ctx: &Context) -> Result<Vec<Stmt>, CliError> {
    let (stmts, diagnostics) = lox_parser::parse(source);

    if !diagnostics.is_empty() {
        report_diagnostics(source, filename, &diagnostics, ctx);
        return Err(CliError::Syntax(diagnostics.len()));
    }

    if ctx.verbose {
        output::info(&format!("Parsed {} statements", stmts.len()));
    }

    Ok(stmts)
}

/// Parse and execute `source` on `interpreter`. With `echo`, a program that
/// is a single expression statement prints its value.
pub(crate) fn execute_source(
    interpreter: &mut Interpreter,
    source: &str,
    filename: &str,
    echo: bool,
    ctx: &Context,
) -> Result<(), CliError> {
    let stmts = parse_source(source, filename, ctx)?;

    let result = match stmts.as_slice() {
        [Stmt::Expression(expr)] if echo => {
            interpreter.evaluate(expr).map(|value| println!("{}", value))
        }
        _ => interpreter.interpret(&stmts),
    };

    result.map_err(|err| {
        report_runtime_error(source, filename, &err, ctx);
        CliError::Runtime
    })
}
