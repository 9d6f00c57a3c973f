//! AST and syntax definitions for Lox.
//!
//! This crate defines the abstract syntax tree produced by the parser
//! and walked by the evaluator. Nodes are immutable once built and own
//! their children; tokens are kept where diagnostics need a location.

mod expr;
pub mod printer;
mod stmt;

pub use expr::*;
pub use stmt::*;
