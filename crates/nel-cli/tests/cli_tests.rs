use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn nel(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nel"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run nel")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_eval_with_vars() {
    let output = nel(&[
        "eval",
        "nation.score > 500 && nation.military.soldiers > 10000",
        "--var",
        "nation.score=1250.5",
        "--var",
        "nation.military.soldiers=15000",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "true");
}

#[test]
fn test_eval_prelude_helper() {
    let output = nel(&["eval", "max(1, 2.5, 2)"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2.5");
}

#[test]
fn test_eval_json_output() {
    let output = nel(&["eval", "upper(name)", "--var", "name=avalon", "--json"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\"AVALON\"");
}

#[test]
fn test_eval_error_exits_nonzero() {
    let output = nel(&["eval", "1 / 0"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Division by zero"));
}

#[test]
fn test_syntax_error_exits_nonzero() {
    let output = nel(&["eval", "nation.score $ 500"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("position 13"));
}

#[test]
fn test_ast_output() {
    let output = nel(&["eval", "(1 + 2) * 3", "--ast"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "((1 + 2) * 3)");
}

#[test]
fn test_tokens_output() {
    let output = nel(&["eval", "a > 1", "--tokens"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 4);
}
