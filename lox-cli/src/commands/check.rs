//! The `lox check` command.
//! `lox check` 命令。

use std::fs;

use lox_syntax::printer::print_program;

use crate::{CliError, Context, output};

/// Lex and parse a Lox file without running it.
/// 对 Lox 文件进行词法和语法分析，但不运行。
pub fn run(file: &str, ast: bool, ctx: &Context) -> Result<(), CliError> {
    let source = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_string(),
        source,
    })?;

    let stmts = super::parse_source(&source, file, ctx)?;

    if ast {
        print!("{}", print_program(&stmts));
    } else if !ctx.quiet {
        output::success("OK - No errors found");
    }

    Ok(())
}
