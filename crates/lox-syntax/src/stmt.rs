//! Statement AST nodes.
//! 语句 AST 节点。

use std::rc::Rc;

use crate::Expr;
use lox_lexer::Token;

/// A statement.
/// 语句。
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `expr;` / 表达式语句
    Expression(Expr),

    /// `print expr;` / 打印语句
    Print(Expr),

    /// `var name = expr;` / 变量声明
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// `{ stmts }` / 块
    Block(Vec<Stmt>),

    /// `if (cond) then else other` / 条件语句
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while (cond) body`; `for` loops are lowered to this too.
    While { condition: Expr, body: Box<Stmt> },

    /// `fun name(params) { body }` / 函数声明
    Function(Rc<FunctionDecl>),

    /// `return value;` / 返回语句
    Return {
        keyword: Token,
        value: Option<Expr>,
    },

    /// `class Name < Super { methods }` / 类声明
    Class(ClassDecl),
}

/// A function or method declaration.
///
/// Shared behind an `Rc` so every closure created from the declaration
/// points at the same node.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Token,
    /// Always an `Expr::Variable` when present.
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
}
