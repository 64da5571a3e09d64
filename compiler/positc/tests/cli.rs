//! End-to-end runs of the `positc` binary.

#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]

use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn positc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_positc"))
        .args(args)
        .env_remove("POSIT_LOG")
        .output()
        .expect("positc binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn version_prints_package_version() {
    let output = positc(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with(&format!("Posit {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn explain_prints_error_docs() {
    let output = positc(&["explain", "E3001"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("# E3001"));
}

#[test]
fn unknown_command_fails_with_usage() {
    let output = positc(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown command: frobnicate"));
    assert!(stdout(&output).contains("Usage: positc <command> [options]"));
}

#[test]
fn check_rejects_invalid_registry_with_code_hint() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("table.json");
    std::fs::write(
        &path,
        r#"{ "definitions": [
              { "name": "d", "variants": [] },
              { "name": "d", "variants": [] }
           ] }"#,
    )
    .expect("temp dir is writable");

    let output = positc(&["check", &path.display().to_string()]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("[E1001] definition `d` is registered twice"), "{err}");
    assert!(err.contains("positc --explain E1001"), "{err}");
}

#[test]
fn load_posts_model_constraints() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{ "variables": [{ "kind": "bool" }, { "kind": "bool" }],
             "constraints": [
               { "name": "int.bool.Eq", "args": [{ "bool": 0 }, { "not_bool": 1 }] }
             ] }"#,
    )
    .expect("temp dir is writable");

    let output = positc(&["load", &path.display().to_string(), "--no-parallel"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("posted 1 constraint(s) over 2 variable(s)\n"));
}
