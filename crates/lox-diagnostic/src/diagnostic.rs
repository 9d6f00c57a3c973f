//! Diagnostic types and builders.

use std::fmt;

use crate::ErrorCode;
use lox_common::Span;

/// Kind of diagnostic for categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
    Runtime,
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// An error diagnostic with optional labels, notes, and help.
///
/// `location` is the short textual position used by the plain renderer,
/// e.g. `at 'foo'` or `at end`.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub span: Span,
    pub location: Option<String>,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            span,
            location: None,
            labels: vec![],
            notes: vec![],
            help: None,
        }
    }

    /// Attach an error code. The code's suggestion becomes the help text
    /// unless help was already set.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        if self.help.is_none() {
            self.help = code.suggestion().map(str::to_string);
        }
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Line the diagnostic points at.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[line {}] Error {}: {}", self.span.line, location, self.message),
            None => write!(f, "[line {}] Error: {}", self.span.line, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::error(DiagnosticKind::Parser, Span::new(4, 5, 2), "Expect ';'.")
            .with_location("at '}'");
        assert_eq!(diag.to_string(), "[line 2] Error at '}': Expect ';'.");
    }

    #[test]
    fn test_display_without_location() {
        let diag = Diagnostic::error(DiagnosticKind::Lexer, Span::point(0, 1), "Unexpected character.");
        assert_eq!(diag.to_string(), "[line 1] Error: Unexpected character.");
    }

    #[test]
    fn test_code_supplies_help() {
        let diag = Diagnostic::error(DiagnosticKind::Parser, Span::DUMMY, "Expect ';'.")
            .with_code(ErrorCode::MissingSemicolon);
        assert_eq!(diag.help.as_deref(), Some("add `;` at the end of the statement"));

        let diag = Diagnostic::error(DiagnosticKind::Parser, Span::DUMMY, "Expect ';'.")
            .with_help("custom")
            .with_code(ErrorCode::MissingSemicolon);
        assert_eq!(diag.help.as_deref(), Some("custom"));
    }
}
