//! # TreePT CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level behavior of the `treept` binary: standard flags, subcommand
//! listing and argument errors.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    treept_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_main_version_flag() {
    treept_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    treept_cmd().assert().failure();
}

#[test]
fn test_source_is_required() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--github-tree"));
}

#[test]
fn test_invalid_project_config_is_reported() {
    let ws = Workspace::new();
    ws.write(".treept.toml", "[render]\nwidth = -5\n");
    ws.write("src/index.js", "");
    ws.cmd()
        .args(["tree", "--dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_unknown_config_key_is_reported() {
    let ws = Workspace::new();
    ws.write(".treept.toml", "[render]\ncolour = true\n");
    ws.write("src/index.js", "");
    ws.cmd()
        .args(["tree", "--dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
