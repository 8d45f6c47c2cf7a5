//! CLI end-to-end tests
//!
//! Tests for the stockpile command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Get a command for the stockpile binary
#[allow(deprecated)]
fn stockpile_cmd() -> Command {
    Command::cargo_bin("stockpile").unwrap()
}

#[test]
fn test_cli_no_args_shows_usage() {
    let mut cmd = stockpile_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = stockpile_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockpile"))
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = stockpile_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockpile"));
}

#[test]
fn test_cli_missing_cache_is_an_error() {
    let mut cmd = stockpile_cmd();
    cmd.args(["--host", "127.0.0.1", "--port", "8080"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cache"));
}
