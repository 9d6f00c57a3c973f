//! End-to-end tests for the `lox` binary.

use std::fs;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn lox(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lox"))
        .args(args)
        .env_remove("LOX_LOG")
        .output()
        .expect("failed to spawn lox")
}

fn script(dir: &TempDir, name: &str, source: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("failed to write script");
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_run_prints_program_output() {
    let dir = TempDir::new().unwrap();
    let file = script(
        &dir,
        "fib.lox",
        r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        for (var i = 0; i < 6; i = i + 1) print fib(i);
        "#,
    );

    let output = lox(&["run", &file]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0\n1\n1\n2\n3\n5\n");
}

#[test]
fn test_bare_file_argument_runs_script() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "hello.lox", "print \"hello\";");

    let output = lox(&[&file]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "hello\n");
}

#[test]
fn test_syntax_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "bad.lox", "print 1\nprint 2;");

    let output = lox(&["--quiet", "run", &file]);
    assert_eq!(output.status.code(), Some(65));
    assert!(stderr(&output).contains("[line 2] Error at 'print': Expect ';' after value."));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_runtime_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "oops.lox", "print 1;\nprint -\"x\";\nprint 2;");

    let output = lox(&["--quiet", "run", &file]);
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(stdout(&output), "1\n");
    assert!(stderr(&output).contains("Operand must be a number.\n[line 2]"));
}

#[test]
fn test_missing_file_exit_code() {
    let output = lox(&["run", "definitely/not/here.lox"]);
    assert_eq!(output.status.code(), Some(74));
    assert!(stderr(&output).contains("cannot read file"));
}

#[test]
fn test_eval_echoes_expression_value() {
    let output = lox(&["eval", "1 + 2;"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "3\n");

    let output = lox(&["eval", "var a = \"x\"; print a + a;"]);
    assert_eq!(stdout(&output), "xx\n");
}

#[test]
fn test_check_prints_ast() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "loop.lox", "for (;;) print 1;");

    let output = lox(&["check", "--ast", &file]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "(while true (print 1))\n");
}

#[test]
fn test_check_reports_every_error() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "two.lox", "var = 1;\nprint (2;\nprint 3;");

    let output = lox(&["--quiet", "check", &file]);
    assert_eq!(output.status.code(), Some(65));
    let err = stderr(&output);
    assert!(err.contains("[line 1] Error at '=': Expect variable name."));
    assert!(err.contains("[line 2] Error at ';': Expect ')' after expression."));
}

#[test]
fn test_global_flags_before_subcommand() {
    let dir = TempDir::new().unwrap();
    let good = script(&dir, "good.lox", "print 1 + 1;");
    let bad = script(&dir, "bad.lox", "print 1");

    let output = lox(&["--verbose", "check", &good]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = lox(&["--no-color", "run", &bad]);
    assert_eq!(output.status.code(), Some(65));

    let output = lox(&["--log", "off", "run", &good]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "2\n");

    let output = lox(&["--quiet", &good]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "2\n");
}

#[test]
fn test_no_hints_drops_notes_from_reports() {
    let dir = TempDir::new().unwrap();
    let file = script(&dir, "neg.lox", "print -\"x\";");

    let output = lox(&["--no-color", "run", &file]);
    assert_eq!(output.status.code(), Some(70));
    let err = stderr(&output);
    assert!(err.contains("Operand must be a number."), "stderr: {}", err);
    assert!(err.contains("operator cannot be applied to these operands"), "stderr: {}", err);

    let output = lox(&["--no-color", "--no-hints", "run", &file]);
    assert_eq!(output.status.code(), Some(70));
    let err = stderr(&output);
    assert!(err.contains("Operand must be a number."), "stderr: {}", err);
    assert!(!err.contains("operator cannot be applied to these operands"), "stderr: {}", err);
}
