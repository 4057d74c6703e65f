//! CLI integration tests for the grind command-line interface.
//!
//! These cover argument parsing, help output, and the rc-file commands
//! (pointed at a temp file via GRIND_RC_PATH). No network is involved.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the grind binary.
fn grind() -> Command {
    Command::cargo_bin("grind").unwrap()
}

/// Same, with the rc file redirected into `dir`.
fn grind_with_rc(dir: &tempfile::TempDir) -> Command {
    let mut cmd = grind();
    cmd.env("GRIND_RC_PATH", dir.path().join(".grindrc"));
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    grind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal capture CLI"));
}

#[test]
fn test_help_lists_subcommands() {
    grind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("capture"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_cli_version_prints() {
    let temp = tempfile::tempdir().unwrap();
    grind_with_rc(&temp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI Version:"));
}

#[test]
fn test_unknown_subcommand_rejected() {
    grind().arg("frobnicate").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_set_then_get() {
    let temp = tempfile::tempdir().unwrap();

    grind_with_rc(&temp)
        .args(["config", "set", "LOG_LEVEL", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set LOG_LEVEL = debug"));

    grind_with_rc(&temp)
        .args(["config", "get", "LOG_LEVEL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOG_LEVEL: debug"));
}

#[test]
fn test_config_get_missing_key() {
    let temp = tempfile::tempdir().unwrap();
    grind_with_rc(&temp)
        .args(["config", "get", "API_BASE_URL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API_BASE_URL is not set"));
}

#[test]
fn test_config_set_rejects_bad_app_mode() {
    let temp = tempfile::tempdir().unwrap();
    grind_with_rc(&temp)
        .args(["config", "set", "APP_MODE", "chaotic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("divergent, typical"));
}

#[test]
fn test_config_unset_protects_required_keys() {
    let temp = tempfile::tempdir().unwrap();

    grind_with_rc(&temp)
        .args(["config", "set", "APP_MODE", "typical"])
        .assert()
        .success();

    grind_with_rc(&temp)
        .args(["config", "unset", "APP_MODE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot remove required key"));

    grind_with_rc(&temp)
        .args(["config", "get", "APP_MODE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP_MODE: typical"));
}

#[test]
fn test_config_init_writes_required_defaults() {
    let temp = tempfile::tempdir().unwrap();

    grind_with_rc(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config saved"));

    grind_with_rc(&temp)
        .args(["config", "get", "APP_MODE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP_MODE: divergent"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Status / Logout (store-only paths, no network)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_auth_status_not_logged_in() {
    let temp = tempfile::tempdir().unwrap();
    grind_with_rc(&temp)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_auth_status_logged_in_then_logout() {
    let temp = tempfile::tempdir().unwrap();

    grind_with_rc(&temp)
        .args(["config", "set", "ACCESS_TOKEN", "tok1"])
        .assert()
        .success();

    grind_with_rc(&temp)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are logged in."));

    grind_with_rc(&temp)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out successfully."));

    grind_with_rc(&temp)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}
