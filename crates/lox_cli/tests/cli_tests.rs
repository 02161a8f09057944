//! CLI integration tests for the `lox` binary.
//!
//! Runs the built binary end-to-end using `std::process::Command`.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn lox() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lox"))
}

/// Get the path to a test fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_script_echoes_tokens() {
    let output = lox()
        .arg(fixture("hello.lox"))
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "@0 Var\n@4 Identifier(hello)\n@10 Equal\n@12 String(\"world\")\n@19 Semicolon\n\
         @21 Print\n@27 Identifier(hello)\n@32 Semicolon\n@34 EOF\n"
    );
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_cli_script_with_errors_exits_65() {
    let output = lox()
        .arg(fixture("errors.lox"))
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(
        stderr(&output),
        "[line 2] Error: Unexpected character '@'.\n[line 4] Error: Unterminated string.\n"
    );
    // Scanning continued past the bad character.
    assert!(stdout(&output).contains("Number(2)"));
}

#[test]
fn test_cli_no_echo() {
    let output = lox()
        .arg("--no-echo")
        .arg(fixture("hello.lox"))
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_cli_pretty_diagnostics() {
    let output = lox()
        .args(["--pretty", "--no-echo"])
        .arg(fixture("errors.lox"))
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(65));
    let err = stderr(&output);
    assert!(err.contains("LX1003"), "{err}");
    assert!(err.contains("LX1001"), "{err}");
}

#[test]
fn test_cli_too_many_arguments_exits_64() {
    let output = lox()
        .args(["one.lox", "two.lox"])
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(64));
    assert_eq!(stdout(&output), "Usage: lox [script]\n");
}

#[test]
fn test_cli_missing_script_exits_66() {
    let output = lox()
        .arg(fixture("does_not_exist.lox"))
        .output()
        .expect("failed to execute lox");
    assert_eq!(output.status.code(), Some(66));
    assert!(stderr(&output).contains("could not read script"));
}

#[test]
fn test_cli_prompt_resets_errors_between_lines() {
    let mut child = lox()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn lox");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"@\nprint 1;\n")
        .expect("failed to write to lox");
    let output = child.wait_with_output().expect("failed to wait for lox");

    // Errors in the prompt never change the exit status.
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "> @1 EOF\n> @0 Print\n@6 Number(1)\n@7 Semicolon\n@8 EOF\n> "
    );
    assert_eq!(
        stderr(&output),
        "[line 1] Error: Unexpected character '@'.\n"
    );
}
