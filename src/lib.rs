//! Workspace root for the Lox interpreter.
//!
//! The interpreter lives in `crates/` and the `lox` binary in `lox-cli/`.
//! This package only hosts the cross-crate integration tests in `tests/`.
