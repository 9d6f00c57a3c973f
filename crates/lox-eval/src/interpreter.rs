//! Statement execution and expression evaluation.

use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use lox_lexer::{Token, TokenKind};
use lox_syntax::{ClassDecl, Expr, Stmt};
use tracing::{debug, trace};

use crate::{Callable, Class, Environment, Function, Instance, NativeFn, RuntimeError, Value};

/// How a statement finished.
///
/// `return` travels outward as `Return` through blocks and loops until the
/// enclosing function call unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Normal,
    Return(Value),
}

/// The tree-walking interpreter.
pub struct Interpreter {
    globals: Environment,
    /// The innermost frame; swapped on block entry and restored on exit
    environment: Environment,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// An interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }

    /// An interpreter printing to `output`.
    pub fn with_output(output: impl Write + 'static) -> Self {
        let globals = Environment::new();
        let mut interpreter = Self {
            environment: globals.clone(),
            globals,
            output: Box::new(output),
        };
        crate::natives::install(&mut interpreter);
        interpreter
    }

    /// The global frame. Persistent across `interpret` calls.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Register a host function as a global.
    pub fn define_native(
        &mut self,
        name: &str,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) {
        let native = NativeFn::new(name, arity, func);
        self.globals.define(name, Value::Native(Rc::new(native)));
    }

    /// Execute a program. Stops at the first runtime error.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = stmts.len()))]
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.execute(stmt)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Execute one statement in the current environment.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Completion, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                self.environment.define(&name.lexeme, value);
            }

            Stmt::Block(stmts) => {
                let env = self.environment.child();
                return self.execute_block(stmts, env);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                } else if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Completion::Return(value) = self.execute(body)? {
                        return Ok(Completion::Return(value));
                    }
                }
            }

            Stmt::Function(decl) => {
                let function = Function::new(Rc::clone(decl), self.environment.clone(), false);
                self.environment
                    .define(&decl.name.lexeme, Value::Function(Rc::new(function)));
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                return Ok(Completion::Return(value));
            }

            Stmt::Class(decl) => self.execute_class(decl)?,
        }

        Ok(Completion::Normal)
    }

    /// Run `stmts` with `env` as the current frame. The previous frame is
    /// restored however the block exits.
    pub fn execute_block(
        &mut self,
        stmts: &[Stmt],
        env: Environment,
    ) -> Result<Completion, RuntimeError> {
        trace!(statements = stmts.len(), "enter block");
        let previous = std::mem::replace(&mut self.environment, env);
        let result = self.execute_all(stmts);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, stmts: &[Stmt]) -> Result<Completion, RuntimeError> {
        for stmt in stmts {
            if let Completion::Return(value) = self.execute(stmt)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }

    fn execute_class(&mut self, decl: &ClassDecl) -> Result<(), RuntimeError> {
        let superclass = match &decl.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let name = match expr {
                        Expr::Variable(name) => name.clone(),
                        _ => decl.name.clone(),
                    };
                    return Err(RuntimeError::SuperclassNotClass { name });
                }
            },
            None => None,
        };

        // Bound first so methods can refer to the class by name.
        self.environment.define(&decl.name.lexeme, Value::Nil);

        let method_env = match &superclass {
            Some(superclass) => {
                let env = self.environment.child();
                env.define("super", Value::Class(Rc::clone(superclass)));
                env
            }
            None => self.environment.clone(),
        };

        let methods: HashMap<String, Rc<Function>> = decl
            .methods
            .iter()
            .map(|method| {
                let is_init = method.name.lexeme == "init";
                let function = Function::new(Rc::clone(method), method_env.clone(), is_init);
                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = Class::new(decl.name.lexeme.clone(), superclass, methods);
        debug!(
            class = %class.name(),
            superclass = class.superclass().map(|s| s.name()),
            methods = decl.methods.len(),
            "define class"
        );
        self.environment
            .assign(&decl.name, Value::Class(Rc::new(class)))
    }

    // ========== Expressions ==========

    /// Evaluate an expression in the current environment.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                match op.kind {
                    TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
                    TokenKind::Minus => match value.as_number() {
                        Some(n) => Ok(Value::Number(-n)),
                        None => {
                            debug!(op = %op.lexeme, operand = value.type_name(), "operand mismatch");
                            Err(RuntimeError::Operand {
                                op: op.clone(),
                                message: "Operand must be a number.",
                            })
                        }
                    },
                    _ => Err(unknown_operator(op)),
                }
            }

            Expr::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(op, left, right)
            }

            Expr::Logical { left, op, right } => {
                let left = self.evaluate(left)?;
                let short_circuits = match op.kind {
                    TokenKind::Or => left.is_truthy(),
                    TokenKind::And => !left.is_truthy(),
                    _ => return Err(unknown_operator(op)),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable(name) => self.environment.get(name),

            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                args,
            } => {
                let callee = self.evaluate(callee)?;
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(self.evaluate(arg)?);
                }
                self.call_value(&callee, paren, arguments)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => Instance::get(&instance, name),
                _ => Err(RuntimeError::NotAnInstance {
                    name: name.clone(),
                    what: "properties",
                }),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::NotAnInstance {
                        name: name.clone(),
                        what: "fields",
                    });
                };
                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This(keyword) => self.environment.get(keyword),

            Expr::Super { keyword, method } => self.evaluate_super(keyword, method),
        }
    }

    fn evaluate_super(&mut self, keyword: &Token, method: &Token) -> Result<Value, RuntimeError> {
        let Some(Value::Class(superclass)) = self.environment.lookup("super") else {
            return Err(RuntimeError::UndefinedVariable {
                name: keyword.clone(),
            });
        };
        let Some(Value::Instance(instance)) = self.environment.lookup("this") else {
            return Err(RuntimeError::UndefinedVariable {
                name: Token::new(TokenKind::This, "this", keyword.span),
            });
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
            None => Err(RuntimeError::UndefinedProperty {
                name: method.clone(),
            }),
        }
    }

    fn call_value(
        &mut self,
        callee: &Value,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let callable: &dyn Callable = match callee {
            Value::Function(function) => function.as_ref(),
            Value::Native(native) => native.as_ref(),
            Value::Class(class) => class,
            _ => {
                return Err(RuntimeError::NotCallable {
                    paren: paren.clone(),
                });
            }
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError::Arity {
                paren: paren.clone(),
                expected: callable.arity(),
                got: arguments.len(),
            });
        }

        callable.call(self, arguments)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_operator(op: &Token) -> RuntimeError {
    RuntimeError::Operand {
        op: op.clone(),
        message: "Unknown operator.",
    }
}

fn binary(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    let mismatch = |message: &'static str| {
        debug!(
            op = %op.lexeme,
            left = left.type_name(),
            right = right.type_name(),
            "operand mismatch"
        );
        RuntimeError::Operand {
            op: op.clone(),
            message,
        }
    };
    let numbers = |message: &'static str| match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(mismatch(message)),
    };

    match op.kind {
        TokenKind::Plus => {
            if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
                return Ok(Value::Number(a + b));
            }
            match (left.as_string(), right.as_string()) {
                (Some(a), Some(b)) => Ok(Value::String(Rc::from(format!("{}{}", a, b)))),
                _ => Err(mismatch("Operands must be two numbers or two strings.")),
            }
        }
        TokenKind::Minus => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Number(a - b))
        }
        TokenKind::Star => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Number(a * b))
        }
        TokenKind::Slash => {
            // IEEE semantics: x / 0 is an infinity or NaN, not an error.
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Number(a / b))
        }
        TokenKind::Gt => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Bool(a > b))
        }
        TokenKind::GtEq => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Bool(a >= b))
        }
        TokenKind::Lt => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Bool(a < b))
        }
        TokenKind::LtEq => {
            let (a, b) = numbers("Operands must be numbers.")?;
            Ok(Value::Bool(a <= b))
        }
        TokenKind::EqEq => Ok(Value::Bool(left == right)),
        TokenKind::BangEq => Ok(Value::Bool(left != right)),
        _ => Err(unknown_operator(op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputBuffer;
    use lox_common::Span;
    use lox_syntax::LiteralValue;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (String, Result<(), RuntimeError>) {
        let (stmts, diags) = lox_parser::parse(source);
        assert!(diags.is_empty(), "unexpected parse errors: {:?}", diags);
        let out = OutputBuffer::new();
        let mut interpreter = Interpreter::with_output(out.clone());
        let result = interpreter.interpret(&stmts);
        (out.contents(), result)
    }

    fn run_ok(source: &str) -> String {
        let (output, result) = run(source);
        if let Err(err) = result {
            panic!("runtime error: {}", err.report());
        }
        output
    }

    #[test]
    fn test_arithmetic_and_concatenation() {
        assert_eq!(run_ok("print 1 + 2 * 3; print \"a\" + \"b\"; print 7 / 2;"), "7\nab\n3.5\n");
    }

    #[test]
    fn test_logical_returns_operand() {
        assert_eq!(run_ok("print nil or \"x\"; print 0 and 1; print false and boom;"), "x\n1\nfalse\n");
    }

    #[test]
    fn test_block_restores_environment() {
        let source = "var a = 1; { var a = 2; print a; } print a;";
        assert_eq!(run_ok(source), "2\n1\n");
    }

    #[test]
    fn test_block_restores_environment_after_error() {
        let out = OutputBuffer::new();
        let mut interpreter = Interpreter::with_output(out.clone());
        let (stmts, _) = lox_parser::parse("var a = 1; { var a = 2; -\"x\"; }");
        assert!(interpreter.interpret(&stmts).is_err());

        let (stmts, _) = lox_parser::parse("print a;");
        assert!(interpreter.interpret(&stmts).is_ok());
        assert_eq!(out.contents(), "1\n");
    }

    #[test]
    fn test_closures_count() {
        let source = r#"
            fun makeCounter() {
                var i = 0;
                fun count() { i = i + 1; return i; }
                return count;
            }
            var c = makeCounter();
            c(); c();
            print c();
        "#;
        assert_eq!(run_ok(source), "3\n");
    }

    #[test]
    fn test_return_unwinds_loops() {
        let source = r#"
            fun first() {
                for (var i = 0; i < 10; i = i + 1) {
                    while (true) { return i; }
                }
            }
            print first();
        "#;
        assert_eq!(run_ok(source), "0\n");
    }

    #[test]
    fn test_return_through_block_restores_caller_frame() {
        let source = r#"
            var a = "global";
            fun inner() {
                var a = "local";
                {
                    var a = "block";
                    return a;
                }
            }
            fun outer() { return a; }
            print inner();
            print a;
            print outer();
        "#;
        assert_eq!(run_ok(source), "block\nglobal\nglobal\n");
    }

    #[test]
    fn test_methods_bind_this() {
        let source = r#"
            class Box {
                init(v) { this.v = v; }
                get() { return this.v; }
            }
            var m = Box(5).get;
            print m();
            print Box;
            print Box(1);
        "#;
        assert_eq!(run_ok(source), "5\nBox\nBox instance\n");
    }

    #[test]
    fn test_super_calls_parent_method() {
        let source = r#"
            class A { say() { return "A"; } }
            class B < A { say() { return "B" + super.say(); } }
            print B().say();
        "#;
        assert_eq!(run_ok(source), "BA\n");
    }

    #[test]
    fn test_runtime_errors() {
        let cases = [
            ("-\"a\";", "Operand must be a number."),
            ("1 < \"a\";", "Operands must be numbers."),
            ("1 + nil;", "Operands must be two numbers or two strings."),
            ("\"x\"();", "Can only call functions and classes."),
            ("fun f(a) {} f();", "Expected 1 arguments but got 0."),
            ("1.x;", "Only instances have properties."),
            ("var a = 1; a.x = 2;", "Only instances have fields."),
            ("var A = 1; class B < A {}", "Superclass must be a class."),
            ("class C {} C().nope;", "Undefined property 'nope'."),
            ("print this;", "Undefined variable 'this'."),
        ];
        for (source, message) in cases {
            let (_, result) = run(source);
            match result {
                Err(err) => assert_eq!(err.to_string(), message, "for {}", source),
                Ok(()) => panic!("expected error for {}", source),
            }
        }
    }

    #[test]
    fn test_unknown_operators_are_errors() {
        let one = || Expr::literal(LiteralValue::Number(1.0));
        let cases = [
            Expr::unary(Token::synthetic(TokenKind::Plus, "+", 4), one()),
            Expr::binary(one(), Token::synthetic(TokenKind::Comma, ",", 4), one()),
            Expr::logical(one(), Token::synthetic(TokenKind::Star, "*", 4), one()),
        ];
        let mut interpreter = Interpreter::with_output(OutputBuffer::new());
        for expr in &cases {
            match interpreter.evaluate(expr) {
                Err(err) => {
                    assert_eq!(err.to_string(), "Unknown operator.");
                    assert_eq!(err.line(), Some(4));
                }
                Ok(value) => panic!("expected an error, got {}", value),
            }
        }
    }

    #[test]
    fn test_super_without_this_points_at_keyword() {
        let mut interpreter = Interpreter::with_output(OutputBuffer::new());
        let parent = Class::new("A", None, HashMap::new());
        interpreter
            .globals()
            .define("super", Value::Class(Rc::new(parent)));

        let keyword = Token::new(TokenKind::Super, "super", Span::new(12, 17, 2));
        let expr = Expr::Super {
            keyword: keyword.clone(),
            method: Token::new(TokenKind::Ident, "m", Span::new(18, 19, 2)),
        };
        let err = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'this'.");
        assert_eq!(err.token().map(|token| token.span), Some(keyword.span));
    }

    #[test]
    fn test_class_keeps_superclass() {
        let (stmts, _) = lox_parser::parse("class A {} class B < A {} class C {}");
        let mut interpreter = Interpreter::with_output(OutputBuffer::new());
        interpreter.interpret(&stmts).unwrap();

        let superclass_of = |name: &str| match interpreter.globals().lookup(name) {
            Some(Value::Class(class)) => class.superclass().map(|s| s.name().to_string()),
            _ => panic!("{} is not a class", name),
        };
        assert_eq!(superclass_of("B"), Some("A".to_string()));
        assert_eq!(superclass_of("C"), None);
    }

    #[test]
    fn test_define_native() {
        let out = OutputBuffer::new();
        let mut interpreter = Interpreter::with_output(out.clone());
        interpreter.define_native("double", 1, |args| match args {
            [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
            _ => Err("expected a number".to_string()),
        });
        let (stmts, _) = lox_parser::parse("print double(21); print clock;");
        interpreter.interpret(&stmts).unwrap();
        assert_eq!(out.contents(), "42\n<native fn>\n");
    }
}
