//! Integration tests for the shopcheck binary.
//!
//! These cover argument handling and configuration errors, which fail before
//! a browser is launched.

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn shopcheck() -> Command {
    let mut cmd = Command::cargo_bin("shopcheck").expect("shopcheck binary should exist");
    cmd.env("NO_COLOR", "1")
        .env_remove("SHOPCHECK_CONFIG")
        .env_remove("SHOPCHECK_BASE_URL");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    shopcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("smoke"))
        .stdout(predicate::str::contains("links"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version() {
    shopcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    shopcheck().arg("checkout").assert().failure();
}

#[test]
fn test_zero_concurrency_is_rejected() {
    shopcheck()
        .args(["links", "-j", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");

    shopcheck()
        .arg("smoke")
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file does not exist"));
}

#[test]
fn test_invalid_base_url_is_reported() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("shopcheck.toml");
    fs::write(&config, "base_url = \"ftp://idream.pl/\"\n").unwrap();

    shopcheck()
        .arg("links")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}
