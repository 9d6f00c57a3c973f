//! Parenthesized prefix printer for the AST.
//!
//! Renders `1 + 2 * 3` as `(+ 1 (* 2 3))` and statements in the same
//! style, one top-level statement per line. Used by `lox check --ast` and
//! by tests that assert on tree shape.

use crate::{ClassDecl, Expr, FunctionDecl, LiteralValue, Stmt};

/// Format a number the way Lox prints it: integral values have no
/// fractional part, non-finite values use their long names.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        // f64's Display already drops a zero fraction: 3.0 -> "3".
        format!("{}", n)
    }
}

/// Render a single expression.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr);
    printer.finish()
}

/// Render a single statement.
pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new();
    printer.stmt(stmt);
    printer.finish()
}

/// Render a whole program, one statement per line.
pub fn print_program(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in stmts {
        out.push_str(&print_stmt(stmt));
        out.push('\n');
    }
    out
}

struct Printer {
    output: String,
}

impl Printer {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write `(name part part ...)` where each part is rendered by `f`.
    fn parenthesize<T>(&mut self, name: &str, parts: &[T], mut f: impl FnMut(&mut Self, &T)) {
        self.write("(");
        self.write(name);
        for part in parts {
            self.write(" ");
            f(self, part);
        }
        self.write(")");
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(value) => self.literal(value),
            Expr::Grouping(inner) => self.parenthesize("group", &[inner.as_ref()], |p, e| p.expr(e)),
            Expr::Unary { op, operand } => {
                self.parenthesize(&op.lexeme, &[operand.as_ref()], |p, e| p.expr(e))
            }
            Expr::Binary { left, op, right } | Expr::Logical { left, op, right } => self
                .parenthesize(&op.lexeme, &[left.as_ref(), right.as_ref()], |p, e| {
                    p.expr(e)
                }),
            Expr::Variable(name) => self.write(&name.lexeme),
            Expr::Assign { name, value } => {
                self.write("(= ");
                self.write(&name.lexeme);
                self.write(" ");
                self.expr(value);
                self.write(")");
            }
            Expr::Call { callee, args, .. } => {
                self.write("(call ");
                self.expr(callee);
                for arg in args {
                    self.write(" ");
                    self.expr(arg);
                }
                self.write(")");
            }
            Expr::Get { object, name } => {
                self.write("(. ");
                self.expr(object);
                self.write(" ");
                self.write(&name.lexeme);
                self.write(")");
            }
            Expr::Set {
                object,
                name,
                value,
            } => {
                self.write("(= (. ");
                self.expr(object);
                self.write(" ");
                self.write(&name.lexeme);
                self.write(") ");
                self.expr(value);
                self.write(")");
            }
            Expr::This(_) => self.write("this"),
            Expr::Super { method, .. } => {
                self.write("(super ");
                self.write(&method.lexeme);
                self.write(")");
            }
        }
    }

    fn literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::Nil => self.write("nil"),
            LiteralValue::Bool(b) => self.write(if *b { "true" } else { "false" }),
            LiteralValue::Number(n) => self.write(&format_number(*n)),
            LiteralValue::String(s) => {
                self.write("\"");
                self.write(s);
                self.write("\"");
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.parenthesize("expr", &[expr], |p, e| p.expr(e)),
            Stmt::Print(expr) => self.parenthesize("print", &[expr], |p, e| p.expr(e)),
            Stmt::Var { name, initializer } => {
                self.write("(var ");
                self.write(&name.lexeme);
                if let Some(init) = initializer {
                    self.write(" ");
                    self.expr(init);
                }
                self.write(")");
            }
            Stmt::Block(stmts) => self.parenthesize("block", stmts, |p, s| p.stmt(s)),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("(if ");
                self.expr(condition);
                self.write(" ");
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.write(" ");
                    self.stmt(else_branch);
                }
                self.write(")");
            }
            Stmt::While { condition, body } => {
                self.write("(while ");
                self.expr(condition);
                self.write(" ");
                self.stmt(body);
                self.write(")");
            }
            Stmt::Function(decl) => self.function(decl),
            Stmt::Return { value, .. } => match value {
                Some(value) => self.parenthesize("return", &[value], |p, e| p.expr(e)),
                None => self.write("(return)"),
            },
            Stmt::Class(class) => self.class(class),
        }
    }

    fn function(&mut self, decl: &FunctionDecl) {
        self.write("(fun ");
        self.write(&decl.name.lexeme);
        self.write(" (");
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        self.write(&params.join(" "));
        self.write(")");
        for stmt in &decl.body {
            self.write(" ");
            self.stmt(stmt);
        }
        self.write(")");
    }

    fn class(&mut self, class: &ClassDecl) {
        self.write("(class ");
        self.write(&class.name.lexeme);
        if let Some(superclass) = &class.superclass {
            self.write(" < ");
            self.expr(superclass);
        }
        for method in &class.methods {
            self.write(" ");
            self.function(method);
        }
        self.write(")");
    }
}
