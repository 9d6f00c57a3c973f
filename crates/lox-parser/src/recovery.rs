//! Synchronization points for panic-mode recovery.
//!
//! After a parse error the parser discards tokens until it has just passed
//! a statement terminator or is looking at a keyword that begins a new
//! statement.

use lox_lexer::TokenKind;

/// Tokens that start a new statement or declaration.
pub const STMT_STARTS: &[TokenKind] = &[
    TokenKind::Class,
    TokenKind::Fun,
    TokenKind::Var,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
    TokenKind::Return,
];

/// Tokens that end a statement.
pub const STMT_ENDS: &[TokenKind] = &[TokenKind::Semicolon];

/// Check if a token starts a statement.
pub fn is_stmt_start(kind: TokenKind) -> bool {
    STMT_STARTS.contains(&kind)
}

/// Check if a token ends a statement.
pub fn is_stmt_end(kind: TokenKind) -> bool {
    STMT_ENDS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stmt_start() {
        assert!(is_stmt_start(TokenKind::Var));
        assert!(is_stmt_start(TokenKind::Return));
        assert!(!is_stmt_start(TokenKind::Else));
        assert!(!is_stmt_start(TokenKind::Plus));
    }

    #[test]
    fn test_is_stmt_end() {
        assert!(is_stmt_end(TokenKind::Semicolon));
        assert!(!is_stmt_end(TokenKind::RBrace));
    }
}
