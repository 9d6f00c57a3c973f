//! Integration tests for lox-parser crate.

use lox_parser::parse;
use lox_syntax::printer::print_program;
use lox_syntax::Stmt;
use pretty_assertions::assert_eq;

fn ast(source: &str) -> String {
    let (stmts, diags) = parse(source);
    assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
    print_program(&stmts)
}

fn errors(source: &str) -> Vec<String> {
    let (_, diags) = parse(source);
    diags.iter().map(|d| d.to_string()).collect()
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn test_parse_class_with_superclass() {
    assert_eq!(
        ast("class B < A { init(x) { this.x = x; } get() { return super.get(); } }"),
        "(class B < A (fun init (x) (expr (= (. this x) x))) (fun get () (return (call (super get)))))\n"
    );
}

#[test]
fn test_parse_dangling_else_binds_inner() {
    assert_eq!(
        ast("if (a) if (b) print 1; else print 2;"),
        "(if a (if b (print 1) (print 2)))\n"
    );
}

#[test]
fn test_parse_for_matches_hand_written_while() {
    let desugared = ast("for (var i = 0; i < 3; i = i + 1) print i;");
    assert_eq!(
        desugared,
        "(block (var i 0) (while (< i 3) (block (print i) (expr (= i (+ i 1))))))\n"
    );
}

#[test]
fn test_parse_for_with_expression_initializer() {
    assert_eq!(
        ast("for (i = 0; i < 1;) print i;"),
        "(block (expr (= i 0)) (while (< i 1) (print i)))\n"
    );
}

#[test]
fn test_parse_function_and_return() {
    assert_eq!(
        ast("fun add(a, b) { return a + b; } fun nothing() { return; }"),
        "(fun add (a b) (return (+ a b)))\n(fun nothing () (return))\n"
    );
}

#[test]
fn test_parse_unary_is_right_recursive() {
    assert_eq!(ast("print !!true;"), "(print (! (! true)))\n");
}

// ============================================================================
// Errors and recovery
// ============================================================================

#[test]
fn test_two_errors_are_isolated() {
    let source = "print 1;\nvar = 2;\nprint 3;\nprint (4;\nprint 5;";
    let (stmts, diags) = parse(source);

    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].to_string(), "[line 2] Error at '=': Expect variable name.");
    assert_eq!(diags[1].to_string(), "[line 4] Error at ';': Expect ')' after expression.");

    let printed: Vec<String> = stmts
        .iter()
        .map(|s| lox_syntax::printer::print_stmt(s))
        .collect();
    assert_eq!(printed, vec!["(print 1)", "(print 3)", "(print 5)"]);
}

#[test]
fn test_error_inside_block_keeps_block() {
    let (stmts, diags) = parse("{ print ; print 2; }");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "Expect expression.");
    assert!(matches!(stmts.as_slice(), [Stmt::Block(inner)] if inner.len() == 1));
}

#[test]
fn test_unclosed_block_reports_at_end() {
    assert_eq!(errors("{ print 1;"), vec!["[line 1] Error at end: Expect '}' after block."]);
}

#[test]
fn test_missing_class_body_brace() {
    assert_eq!(
        errors("class A print"),
        vec!["[line 1] Error at 'print': Expect '{' before class body."]
    );
}

#[test]
fn test_too_many_arguments_is_reported_once_parse_continues() {
    let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
    let source = format!("f({});", args.join(", "));
    let (stmts, diags) = parse(&source);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "Can't have more than 255 arguments.");
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_lexer_errors_come_first() {
    let (_, diags) = parse("print @;");
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].message, "Unexpected character.");
    assert_eq!(diags[1].message, "Expect expression.");
}
