//! Parser for Lox.
//!
//! This crate provides a recursive descent parser that converts
//! tokens into a sequence of statements.
//!
//! ## Error Recovery
//!
//! The parser uses panic-mode recovery: a malformed statement is reported
//! once, the parser skips to the next statement boundary, and parsing
//! continues. One source file can therefore yield several independent
//! diagnostics along with every well-formed statement around them.

mod parser;
mod recovery;

pub use parser::Parser;
pub use recovery::{is_stmt_end, is_stmt_start, STMT_ENDS, STMT_STARTS};

use lox_diagnostic::Diagnostic;
use lox_lexer::{Lexer, Token};
use lox_syntax::Stmt;

/// Lex and parse source code. Lexer and parser diagnostics are returned
/// together, lexer first.
pub fn parse(source: &str) -> (Vec<Stmt>, Vec<Diagnostic>) {
    let lexer = Lexer::new(source);
    let (tokens, mut diagnostics) = lexer.tokenize();

    let (stmts, parse_diagnostics) = parse_tokens(tokens);
    diagnostics.extend(parse_diagnostics);
    (stmts, diagnostics)
}

/// Parse an already-lexed token stream. A missing trailing `Eof` is added.
pub fn parse_tokens(tokens: Vec<Token>) -> (Vec<Stmt>, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let stmts = parser.parse();
    (stmts, parser.diagnostics())
}
