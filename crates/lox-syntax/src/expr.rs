//! Expression AST nodes.
//! 表达式 AST 节点。

use lox_lexer::Token;

/// An expression.
/// 表达式。
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `nil`, `true`, `42`, `"hi"` / 字面量
    Literal(LiteralValue),

    /// `( expr )` / 括号表达式
    Grouping(Box<Expr>),

    /// `-a`, `!a` / 一元运算
    Unary { op: Token, operand: Box<Expr> },

    /// `a + b` / 二元运算
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },

    /// Short-circuiting `a and b`, `a or b` / 逻辑运算
    Logical {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },

    /// Variable reference / 变量引用
    Variable(Token),

    /// `name = value` / 赋值
    Assign { name: Token, value: Box<Expr> },

    /// `callee(args)`; `paren` is the closing parenthesis, used for
    /// diagnostics.
    Call {
        callee: Box<Expr>,
        paren: Token,
        args: Vec<Expr>,
    },

    /// Property access `object.name` / 属性访问
    Get { object: Box<Expr>, name: Token },

    /// Property assignment `object.name = value` / 属性赋值
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// `this`
    This(Token),

    /// `super.method`
    Super { keyword: Token, method: Token },
}

/// The value of a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Expr {
    pub fn literal(value: LiteralValue) -> Self {
        Expr::Literal(value)
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn unary(op: Token, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, op: Token, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(name: Token, value: Expr) -> Self {
        Expr::Assign {
            name,
            value: Box::new(value),
        }
    }
}
