//! Common utilities and data structures for Lox.
//!
//! This crate provides foundational types used across the interpreter:
//! - `Span`: Source code location tracking (byte range plus line)

mod span;

pub use span::Span;
