//! Integration tests for the `vault-demo` binary.
//!
//! Responsibilities:
//! - Validate help and version output.
//! - Validate exit codes for settings, startup and bind failures.
//!
//! Does NOT:
//! - Exercise endpoints over a real socket (see api_tests.rs).
//!
//! Invariants:
//! - All tests use the hermetic `vault_demo_cmd()` helper and an explicit `--settings` file.

mod common;

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;

use common::vault_demo_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn settings_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("settings.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help_lists_options() {
    vault_demo_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--settings")
            .and(predicate::str::contains("--bind"))
            .and(predicate::str::contains("--kv-root"))
            .and(predicate::str::contains("--refresh-interval"))
            .and(predicate::str::contains("--log-format")),
    );
}

#[test]
fn test_version() {
    vault_demo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vault-demo"));
}

#[test]
fn test_missing_settings_file_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    vault_demo_cmd()
        .arg("--settings")
        .arg(&missing)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Settings file not found"));
}

#[test]
fn test_invalid_bind_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "application: cli-test\n");

    vault_demo_cmd()
        .arg("--settings")
        .arg(&settings)
        .args(["--bind", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid bind address"));
}

#[test]
fn test_out_of_range_timeout_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "loader_timeout_secs: 0\n");

    vault_demo_cmd()
        .arg("--settings")
        .arg(&settings)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid loader timeout"));
}

#[test]
fn test_duplicate_source_exits_with_startup_error() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(
        &dir,
        "sources:\n  - name: secret/common\n    priority: 1\n  - name: secret/common\n    priority: 2\n",
    );

    vault_demo_cmd()
        .arg("--settings")
        .arg(&settings)
        .args(["--bind", "127.0.0.1:0"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("secret/common"));
}

#[test]
fn test_address_in_use_exits_with_bind_error() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "sources: []\n");
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = occupied.local_addr().unwrap();

    vault_demo_cmd()
        .arg("--settings")
        .arg(&settings)
        .args(["--bind", &addr.to_string()])
        .arg("--kv-root")
        .arg(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed to bind"));
}

#[test]
fn test_blank_env_settings_are_ignored() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "sources: []\n");
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = occupied.local_addr().unwrap();

    // Settings pass validation, so startup proceeds until the bind fails.
    vault_demo_cmd()
        .env("VAULT_DEMO_LOADER_TIMEOUT", "   ")
        .env("VAULT_DEMO_REFRESH_INTERVAL", " ")
        .env("VAULT_DEMO_LOG_FORMAT", "  ")
        .arg("--settings")
        .arg(&settings)
        .args(["--bind", &addr.to_string()])
        .arg("--kv-root")
        .arg(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed to bind"));
}

#[test]
fn test_unknown_log_format_in_env_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "sources: []\n");

    vault_demo_cmd()
        .env("VAULT_DEMO_LOG_FORMAT", "xml")
        .arg("--settings")
        .arg(&settings)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("VAULT_DEMO_LOG_FORMAT"));
}
