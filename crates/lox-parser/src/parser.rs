//! The Lox parser.

use std::rc::Rc;

use lox_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use lox_lexer::{Literal, Token, TokenKind};
use lox_syntax::*;
use tracing::{debug, trace};

use crate::recovery::{is_stmt_end, is_stmt_start};

/// Upper bound on call arguments and function parameters.
const MAX_ARGS: usize = 255;

/// Marker for a structural parse failure. The diagnostic has already been
/// recorded when this is produced; it only unwinds to the nearest
/// declaration, which synchronizes.
#[derive(Debug)]
struct ParseError;

type ParseResult<T> = Result<T, ParseError>;

/// The Lox parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Number of function bodies currently being parsed
    function_depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::synthetic(TokenKind::Eof, "", line));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            function_depth: 0,
        }
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parse the whole token stream. Statements that fail to parse are
    /// reported and left out of the result.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();

        while !self.at_end() {
            if let Some(stmt) = self.parse_declaration() {
                stmts.push(stmt);
            }
        }

        debug!(
            statements = stmts.len(),
            errors = self.diagnostics.len(),
            "parsed program"
        );
        stmts
    }

    // ========== Declarations ==========

    /// The recovery boundary: any `ParseError` raised below stops here.
    fn parse_declaration(&mut self) -> Option<Stmt> {
        let result = if self.eat(TokenKind::Class) {
            self.parse_class_decl()
        } else if self.eat(TokenKind::Fun) {
            self.parse_function("function").map(Stmt::Function)
        } else if self.eat(TokenKind::Var) {
            self.parse_var_decl()
        } else {
            self.parse_statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(ParseError) => {
                self.synchronize();
                None
            }
        }
    }

    fn parse_class_decl(&mut self) -> ParseResult<Stmt> {
        let name = self.expect(TokenKind::Ident, "Expect class name.")?;

        let superclass = if self.eat(TokenKind::Lt) {
            let super_name = self.expect(TokenKind::Ident, "Expect superclass name.")?;
            if super_name.lexeme == name.lexeme {
                self.report(
                    &super_name,
                    "A class can't inherit from itself.",
                    ErrorCode::SelfInheritance,
                );
            }
            Some(Expr::Variable(super_name))
        } else {
            None
        };

        self.expect(TokenKind::LBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            methods.push(self.parse_function("method")?);
        }

        self.expect(TokenKind::RBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassDecl {
            name,
            superclass,
            methods,
        }))
    }

    /// Parse the part of a function or method after `fun`: name,
    /// parameters and body. `kind` only feeds the error messages.
    fn parse_function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.expect(TokenKind::Ident, &format!("Expect {} name.", kind))?;
        self.expect(TokenKind::LParen, &format!("Expect '(' after {} name.", kind))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    let token = self.current().clone();
                    self.report(
                        &token,
                        "Can't have more than 255 parameters.",
                        ErrorCode::TooManyArguments,
                    );
                }
                params.push(self.expect(TokenKind::Ident, "Expect parameter name.")?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "Expect ')' after parameters.")?;
        self.expect(TokenKind::LBrace, &format!("Expect '{{' before {} body.", kind))?;

        self.function_depth += 1;
        let body = self.parse_block();
        self.function_depth -= 1;

        Ok(Rc::new(FunctionDecl {
            name,
            params,
            body: body?,
        }))
    }

    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let name = self.expect(TokenKind::Ident, "Expect variable name.")?;

        let initializer = if self.eat(TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    // ========== Statements ==========

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current_kind() {
            TokenKind::For => {
                self.advance();
                self.parse_for()
            }
            TokenKind::If => {
                self.advance();
                self.parse_if()
            }
            TokenKind::Print => {
                self.advance();
                self.parse_print()
            }
            TokenKind::Return => {
                self.advance();
                self.parse_return()
            }
            TokenKind::While => {
                self.advance();
                self.parse_while()
            }
            TokenKind::LBrace => {
                self.advance();
                Ok(Stmt::Block(self.parse_block()?))
            }
            _ => self.parse_expr_stmt(),
        }
    }

    /// Parse a `for` loop and lower it to `while`:
    ///
    /// ```text
    /// for (init; cond; incr) body
    ///   => { init; while (cond) { body; incr; } }
    /// ```
    ///
    /// A missing condition becomes `true`; missing clauses add no wrapper.
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LParen, "Expect '(' after 'for'.")?;

        let initializer = if self.eat(TokenKind::Semicolon) {
            None
        } else if self.eat(TokenKind::Var) {
            Some(self.parse_var_decl()?)
        } else {
            Some(self.parse_expr_stmt()?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition.unwrap_or(Expr::Literal(LiteralValue::Bool(true)));
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_statement()?);
        // A dangling `else` binds to the nearest `if`.
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        if self.function_depth == 0 {
            self.report(
                &keyword,
                "Can't return from top-level code.",
                ErrorCode::TopLevelReturn,
            );
        }

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LParen, "Expect '(' after 'while'.")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expect ')' after condition.")?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// Parse declarations up to the closing brace. The opening brace has
    /// already been consumed. Errors inside are recovered per declaration.
    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.at_end() {
            if let Some(stmt) = self.parse_declaration() {
                stmts.push(stmt);
            }
        }

        self.expect(TokenKind::RBrace, "Expect '}' after block.")?;
        Ok(stmts)
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    // ========== Expression Parsing ==========

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and its target is validated after
    /// the fact: the left side is parsed as an ordinary expression and only
    /// a variable or property access is accepted once `=` shows up.
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_or_expr()?;

        if self.eat(TokenKind::Eq) {
            let equals = self.previous().clone();
            let value = self.parse_assignment()?;

            return match expr {
                Expr::Variable(name) => Ok(Expr::assign(name, value)),
                Expr::Get { object, name } => Ok(Expr::Set {
                    object,
                    name,
                    value: Box::new(value),
                }),
                other => {
                    self.report(
                        &equals,
                        "Invalid assignment target.",
                        ErrorCode::InvalidAssignmentTarget,
                    );
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    fn parse_or_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and_expr()?;

        while self.check(TokenKind::Or) {
            let op = self.advance();
            let right = self.parse_and_expr()?;
            left = Expr::logical(left, op, right);
        }

        Ok(left)
    }

    fn parse_and_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality_expr()?;

        while self.check(TokenKind::And) {
            let op = self.advance();
            let right = self.parse_equality_expr()?;
            left = Expr::logical(left, op, right);
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison_expr()?;

        while matches!(self.current_kind(), TokenKind::EqEq | TokenKind::BangEq) {
            let op = self.advance();
            let right = self.parse_comparison_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_comparison_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive_expr()?;

        while matches!(
            self.current_kind(),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq
        ) {
            let op = self.advance();
            let right = self.parse_additive_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_additive_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative_expr()?;

        while matches!(self.current_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance();
            let right = self.parse_multiplicative_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while matches!(self.current_kind(), TokenKind::Star | TokenKind::Slash) {
            let op = self.advance();
            let right = self.parse_unary_expr()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        if matches!(self.current_kind(), TokenKind::Bang | TokenKind::Minus) {
            let op = self.advance();
            let operand = self.parse_unary_expr()?;
            return Ok(Expr::unary(op, operand));
        }

        self.parse_call_expr()
    }

    fn parse_call_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary_expr()?;

        loop {
            if self.eat(TokenKind::LParen) {
                expr = self.finish_call(expr)?;
            } else if self.eat(TokenKind::Dot) {
                let name = self.expect(TokenKind::Ident, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if args.len() >= MAX_ARGS {
                    let token = self.current().clone();
                    self.report(
                        &token,
                        "Can't have more than 255 arguments.",
                        ErrorCode::TooManyArguments,
                    );
                }
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.expect(TokenKind::RParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            args,
        })
    }

    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.current_kind() {
            TokenKind::False => {
                self.advance();
                Ok(Expr::literal(LiteralValue::Bool(false)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::literal(LiteralValue::Bool(true)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::literal(LiteralValue::Nil))
            }
            TokenKind::Number | TokenKind::String => {
                let token = self.advance();
                let value = match token.literal {
                    Some(Literal::Number(n)) => LiteralValue::Number(n),
                    Some(Literal::String(s)) => LiteralValue::String(s),
                    None => return Err(self.error_at(&token, "Expect literal value.")),
                };
                Ok(Expr::literal(value))
            }
            TokenKind::Super => {
                let keyword = self.advance();
                self.expect(TokenKind::Dot, "Expect '.' after 'super'.")?;
                let method = self.expect(TokenKind::Ident, "Expect superclass method name.")?;
                Ok(Expr::Super { keyword, method })
            }
            TokenKind::This => Ok(Expr::This(self.advance())),
            TokenKind::Ident => Ok(Expr::Variable(self.advance())),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "Expect ')' after expression.")?;
                Ok(Expr::grouping(inner))
            }
            _ => {
                let token = self.current().clone();
                self.report(&token, "Expect expression.", ErrorCode::ExpectedExpression);
                Err(ParseError)
            }
        }
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        // The stream always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        if !self.at_end() {
            self.pos += 1;
        }
        self.previous().clone()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let token = self.current().clone();
        Err(self.error_at(&token, message))
    }

    /// Record a structural error at `token` and return the abort marker.
    fn error_at(&mut self, token: &Token, message: &str) -> ParseError {
        let code = if message.starts_with("Expect ';'") {
            ErrorCode::MissingSemicolon
        } else {
            ErrorCode::UnexpectedToken
        };
        self.report(token, message, code);
        ParseError
    }

    /// Record a diagnostic without aborting the current statement.
    fn report(&mut self, token: &Token, message: &str, code: ErrorCode) {
        let label = if token.kind == TokenKind::Eof {
            "end of input"
        } else {
            "here"
        };
        self.diagnostics.push(
            Diagnostic::error(DiagnosticKind::Parser, token.span, message)
                .with_code(code)
                .with_location(token.location())
                .with_label(Label::new(token.span, label)),
        );
    }

    // ========== Error Recovery ==========

    /// Synchronize to the next statement boundary: skip tokens until one
    /// that ends a statement has just been consumed, or one that starts a
    /// statement is next. Always consumes at least one token so a bad
    /// token cannot stall the parser.
    fn synchronize(&mut self) {
        trace!(line = self.current().line, "synchronizing after parse error");
        self.advance();

        while !self.at_end() {
            if is_stmt_end(self.previous().kind) {
                return;
            }

            if is_stmt_start(self.current_kind()) {
                return;
            }

            self.advance();
        }
    }
}
