//! Integration tests for the `toggl-daily-report` binary.
//!
//! None of these reach the real Toggl API: they either fail before any
//! request is made or point the client at a closed local port.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:1/api/v9";

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_toggl-daily-report"));
    command
        .env_remove("TOGGL_API_TOKEN")
        .env_remove("TOGGL_WORKSPACE_ID")
        .env_remove("TOGGL_API_URL")
        .env_remove("RUST_LOG");
    command
}

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn run_with_config(config: &Path, args: &[&str]) -> Output {
    binary()
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run toggl-daily-report")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_flags() {
    let output = binary().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--date", "--project", "--config", "--lang", "--json"] {
        assert!(stdout.contains(flag), "help should mention {flag}: {stdout}");
    }
}

#[test]
fn test_invalid_date_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, r#"{"api_token": "token"}"#);

    let output = run_with_config(&config, &["--date", "2024-13-01"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid date format: 2024-13-01"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_token_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("absent.json");

    let output = run_with_config(&config, &["--date", "2024-03-01"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("API token not found"), "{stderr}");
    assert!(stderr.contains("absent.json"), "{stderr}");
}

#[test]
fn test_malformed_config_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "{ this is not json");

    let output = run_with_config(&config, &["--date", "2024-03-01"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to load config file"));
}

#[test]
fn test_unreachable_api_is_a_fetch_error() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        &temp,
        &format!(r#"{{"api_token": "token", "workspace_id": 42, "api_url": "{UNREACHABLE_API}"}}"#),
    );

    let output = run_with_config(&config, &["--date", "2024-03-01"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to fetch time entries"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_token_from_environment() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        &temp,
        &format!(r#"{{"workspace_id": "42", "api_url": "{UNREACHABLE_API}"}}"#),
    );

    let output = binary()
        .env("TOGGL_API_TOKEN", "env-token")
        .arg("--config")
        .arg(&config)
        .arg("--date")
        .arg("2024-03-01")
        .output()
        .unwrap();

    // Got past config validation and failed on the network instead
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(!stderr.contains("API token not found"), "{stderr}");
    assert!(stderr.contains("failed to fetch time entries"), "{stderr}");
}

#[test]
fn test_default_config_path_is_next_to_binary() {
    let output = binary().arg("--date").arg("2024-03-01").output().unwrap();

    // No config beside the test binary and no token in the environment
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".toggl-daily-report.json"));
}
