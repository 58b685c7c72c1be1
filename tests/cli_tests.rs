//! Integration tests for the CLI interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_CONFIG: &str = r#"
[engine]
mode = "concurrent"
retry_interval_secs = 1
max_retries = 1

[watch]
heartbeat_interval = "1s"
api_base = "http://127.0.0.1:9"

[[accounts]]
access_key = "0123456789abcdef"
push = "ops"

[push.ops]
url = "http://127.0.0.1:9/hook"
"#;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

fn medal_helper() -> Command {
    let mut cmd = Command::cargo_bin("medal-helper").unwrap();
    for var in [
        "MEDAL_HELPER_MODE",
        "MEDAL_HELPER_RETRY_INTERVAL",
        "MEDAL_HELPER_MAX_RETRIES",
        "MEDAL_HELPER_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help_flag() {
    medal_helper()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_invalid_command() {
    medal_helper()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_validate_accepts_good_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID_CONFIG);

    medal_helper()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 account(s), concurrent mode"));
}

#[test]
fn test_env_override_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID_CONFIG);

    medal_helper()
        .env("MEDAL_HELPER_MODE", "sync")
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("sequential mode"));
}

#[test]
fn test_bad_env_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID_CONFIG);

    medal_helper()
        .env("MEDAL_HELPER_MODE", "sideways")
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("MEDAL_HELPER_MODE"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    medal_helper()
        .arg("validate")
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_config_with_unknown_push_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[[accounts]]\naccess_key = \"0123456789abcdef\"\npush = \"pager\"\n",
    );

    medal_helper()
        .args(["validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pager"));
}

#[test]
fn test_check_fails_when_gateway_is_unreachable() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID_CONFIG);

    medal_helper()
        .args(["check", "--config"])
        .arg(&path)
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to log in"));
}

#[test]
fn test_verbose_run_logs_config_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID_CONFIG);

    medal_helper()
        .args(["validate", "-v", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
