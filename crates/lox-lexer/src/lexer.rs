//! The Lox lexer.
//! Lox 词法分析器。

use crate::token::{Literal, Token, TokenKind};
use lox_common::Span;
use lox_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};

/// The Lox lexer.
/// Lox 词法分析器。
///
/// Converts source code into a sequence of tokens. Errors are collected as
/// diagnostics and scanning resumes with the next character.
/// 将源代码转换为 token 序列。
pub struct Lexer<'src> {
    source: &'src str,
    /// Character iterator with position info
    /// 带位置信息的字符迭代器
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    /// Current byte position in source
    /// 当前在源码中的字节位置
    pos: usize,
    /// Current line (1-based)
    /// 当前行号（从 1 开始）
    line: u32,
    /// Collected diagnostics
    /// 收集的诊断信息
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            pos: 0,
            line: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire source and return tokens and diagnostics.
    /// The token list always ends with `Eof`.
    /// 对整个源代码进行词法分析，返回 token 列表和诊断信息。
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();

        loop {
            let Some(token) = self.next_token() else {
                continue;
            };
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        (tokens, self.diagnostics)
    }

    /// Scan one token. Returns `None` when the scanned text produced no
    /// token (an error that was reported).
    /// 扫描一个 token；出错时返回 `None`。
    fn next_token(&mut self) -> Option<Token> {
        // Skip whitespace and comments - 跳过空白和注释
        self.skip_trivia();

        let start = self.pos;
        let line = self.line;

        let Some((_, ch)) = self.advance() else {
            return Some(Token::new(TokenKind::Eof, "", Span::point(start, line)));
        };

        let kind = match ch {
            // Single character tokens - 单字符 token
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,

            // One or two character tokens - 一或两个字符的 token
            '!' => self.either('=', TokenKind::BangEq, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),

            // String literal - 字符串字面量
            '"' => return self.string_literal(start, line),

            // Numbers - 数字
            '0'..='9' => return Some(self.number(start, line)),

            // Identifiers and keywords - 标识符和关键字
            'a'..='z' | 'A'..='Z' | '_' => return Some(self.identifier(start, line)),

            _ => {
                self.error_unexpected_char(start, line);
                return None;
            }
        };

        Some(self.make_token(kind, start, line))
    }

    fn make_token(&self, kind: TokenKind, start: usize, line: u32) -> Token {
        Token::new(kind, &self.source[start..self.pos], Span::new(start, self.pos, line))
    }

    /// Consume `expected` if it is next and return `matched`, else `single`.
    fn either(&mut self, expected: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_char() == Some(expected) {
            self.advance();
            matched
        } else {
            single
        }
    }

    /// Advance to the next character, tracking newlines.
    /// 前进到下一个字符。
    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.pos = pos + ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
        }
        result
    }

    /// Peek at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    /// Peek at the nth character ahead.
    /// 查看前方第 n 个字符。
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, ch)| ch)
    }

    /// Skip whitespace and `//` line comments.
    /// 跳过空白字符和 `//` 行注释。
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_nth(1) == Some('/') {
                while let Some(ch) = self.peek_char() {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Scan a string literal. The opening quote is already consumed.
    /// Strings may span lines and have no escape sequences.
    /// 解析字符串字面量（可跨行，无转义序列）。
    fn string_literal(&mut self, start: usize, line: u32) -> Option<Token> {
        loop {
            match self.advance() {
                Some((_, '"')) => break,
                Some(_) => {}
                None => {
                    let span = Span::new(start, self.pos, self.line);
                    self.diagnostics.push(
                        Diagnostic::error(DiagnosticKind::Lexer, span, "Unterminated string.")
                            .with_code(ErrorCode::UnterminatedString)
                            .with_label(Label::new(span, "string starts here")),
                    );
                    return None;
                }
            }
        }

        let value = self.source[start + 1..self.pos - 1].to_string();
        Some(self.make_token(TokenKind::String, start, line).with_literal(Literal::String(value)))
    }

    /// Scan a number literal: digits with an optional fractional part.
    /// A trailing `.` without digits is left for the next token.
    /// 解析数字字面量。
    fn number(&mut self, start: usize, line: u32) -> Token {
        self.digits();

        // Decimal part - 小数部分
        if self.peek_char() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            self.digits();
        }

        let text = &self.source[start..self.pos];
        // Digits-and-dot text always parses as f64.
        let value = text.parse::<f64>().unwrap_or_default();
        self.make_token(TokenKind::Number, start, line)
            .with_literal(Literal::Number(value))
    }

    fn digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scan an identifier or keyword.
    /// 解析标识符或关键字。
    fn identifier(&mut self, start: usize, line: u32) -> Token {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        // Check for keywords - 检查是否为关键字
        let text = &self.source[start..self.pos];
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.make_token(kind, start, line)
    }

    /// Report an unexpected character error.
    /// 报告意外字符错误。
    fn error_unexpected_char(&mut self, pos: usize, line: u32) {
        let span = Span::new(pos, self.pos, line);
        self.diagnostics.push(
            Diagnostic::error(DiagnosticKind::Lexer, span, "Unexpected character.")
                .with_code(ErrorCode::UnexpectedCharacter)
                .with_label(Label::new(span, "unexpected character here")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = Lexer::new(source).tokenize();
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                TokenKind::Bang,
                TokenKind::BangEq,
                TokenKind::Eq,
                TokenKind::EqEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_then_method_dot() {
        let (tokens, diags) = Lexer::new("12.5 7.").tokenize();
        assert!(diags.is_empty());
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.5)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(7.0)));
        assert_eq!(tokens[2].kind, TokenKind::Dot);
    }

    #[test]
    fn test_multiline_string_tracks_lines() {
        let (tokens, diags) = Lexer::new("\"a\nb\" x").tokenize();
        assert!(diags.is_empty());
        assert_eq!(tokens[0].literal, Some(Literal::String("a\nb".to_string())));
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }
}
