//! Binary integration tests for contacts-server
//!
//! Entry point checks only; request handling is covered in api_tests.rs.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// CONTACTS-SERVER BINARY TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_server_binary_help() {
    let mut cmd = Command::cargo_bin("contacts-server").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contacts API Server"))
        .stdout(predicate::str::contains("/api/v1/contacts"));
}

#[test]
fn test_server_binary_version() {
    let mut cmd = Command::cargo_bin("contacts-server").unwrap();
    cmd.arg("--version").assert().success();
}

#[test]
fn test_server_binary_rejects_bad_port() {
    let mut cmd = Command::cargo_bin("contacts-server").unwrap();
    cmd.args(["--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_server_binary_rejects_unknown_locale() {
    let mut cmd = Command::cargo_bin("contacts-server").unwrap();
    cmd.args(["--locale", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fr"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTACTS SERVE SUBCOMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_serve_subcommand_help() {
    let mut cmd = Command::cargo_bin("contacts").unwrap();
    cmd.args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"));
}
