//! Runtime errors.

use lox_common::Span;
use lox_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use lox_lexer::Token;
use thiserror::Error;

/// Errors raised while executing a program. Each aborts the run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },

    #[error("Undefined property '{}'.", .name.lexeme)]
    UndefinedProperty { name: Token },

    /// Operator applied to operands of the wrong kind.
    #[error("{message}")]
    Operand { op: Token, message: &'static str },

    #[error("Can only call functions and classes.")]
    NotCallable { paren: Token },

    #[error("Expected {expected} arguments but got {got}.")]
    Arity {
        paren: Token,
        expected: usize,
        got: usize,
    },

    /// Property read or write on a non-instance. `what` is `properties`
    /// for reads and `fields` for writes.
    #[error("Only instances have {what}.")]
    NotAnInstance { name: Token, what: &'static str },

    #[error("Superclass must be a class.")]
    SuperclassNotClass { name: Token },

    /// A native function reported a failure.
    #[error("{name}: {message}")]
    Native { name: String, message: String },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// The token the error is reported at, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            RuntimeError::UndefinedVariable { name }
            | RuntimeError::UndefinedProperty { name }
            | RuntimeError::NotAnInstance { name, .. }
            | RuntimeError::SuperclassNotClass { name } => Some(name),
            RuntimeError::Operand { op, .. } => Some(op),
            RuntimeError::NotCallable { paren } | RuntimeError::Arity { paren, .. } => Some(paren),
            RuntimeError::Native { .. } | RuntimeError::Io(_) => None,
        }
    }

    pub fn line(&self) -> Option<u32> {
        self.token().map(|token| token.line)
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            RuntimeError::UndefinedVariable { .. } => Some(ErrorCode::UndefinedVariable),
            RuntimeError::UndefinedProperty { .. } => Some(ErrorCode::UndefinedProperty),
            RuntimeError::Operand { .. } => Some(ErrorCode::OperandType),
            RuntimeError::NotCallable { .. } => Some(ErrorCode::NotCallable),
            RuntimeError::Arity { .. } => Some(ErrorCode::WrongArity),
            RuntimeError::NotAnInstance { .. } => Some(ErrorCode::NotAnInstance),
            RuntimeError::SuperclassNotClass { .. } => Some(ErrorCode::SuperclassNotClass),
            RuntimeError::Native { .. } | RuntimeError::Io(_) => None,
        }
    }

    /// Plain report: the message, then `[line N]` when the error has a
    /// position.
    pub fn report(&self) -> String {
        match self.line() {
            Some(line) => format!("{}\n[line {}]", self, line),
            None => self.to_string(),
        }
    }

    /// Convert into a diagnostic for rich rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.token().map_or(Span::DUMMY, |token| token.span);
        let mut diagnostic = Diagnostic::error(DiagnosticKind::Runtime, span, self.to_string());
        if let Some(code) = self.code() {
            diagnostic = diagnostic.with_code(code).with_note(code.description());
        }
        if let RuntimeError::Arity { expected, got, .. } = self {
            diagnostic = diagnostic.with_note(format!(
                "the callee takes {expected} argument(s); this call passes {got}"
            ));
        }
        if let Some(token) = self.token() {
            diagnostic = diagnostic
                .with_location(token.location())
                .with_label(Label::new(token.span, "error occurred here"));
        }
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lexer::TokenKind;

    #[test]
    fn test_report_includes_line() {
        let err = RuntimeError::Operand {
            op: Token::synthetic(TokenKind::Minus, "-", 3),
            message: "Operand must be a number.",
        };
        assert_eq!(err.report(), "Operand must be a number.\n[line 3]");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_arity_message_and_diagnostic() {
        let err = RuntimeError::Arity {
            paren: Token::synthetic(TokenKind::RParen, ")", 7),
            expected: 2,
            got: 1,
        };
        assert_eq!(err.to_string(), "Expected 2 arguments but got 1.");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, Some(ErrorCode::WrongArity));
        assert_eq!(diag.line(), 7);
        assert!(diag.help.is_some());
        assert_eq!(
            diag.notes,
            vec![
                "wrong number of arguments".to_string(),
                "the callee takes 2 argument(s); this call passes 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_undefined_variable_diagnostic_notes_lookup() {
        let err = RuntimeError::UndefinedVariable {
            name: Token::synthetic(TokenKind::Ident, "x", 2),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.notes, vec!["cannot find variable in any enclosing scope".to_string()]);
        assert_eq!(diag.labels.len(), 1);
    }

    #[test]
    fn test_native_error_has_no_notes() {
        let err = RuntimeError::Native {
            name: "clock".to_string(),
            message: "clock is before the epoch".to_string(),
        };
        let diag = err.to_diagnostic();
        assert!(diag.notes.is_empty());
        assert!(diag.code.is_none());
    }
}
