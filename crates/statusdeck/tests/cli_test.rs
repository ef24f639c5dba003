//! Integration tests for the `statusdeck` binary.
//!
//! Argument parsing, completions, config handling and error exit codes run
//! without a backend; the `status` and `whoami` tests use a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the binary with its config rooted in `home`.
///
/// Clears every `STATUSDECK_*` variable so the user's shell never leaks in.
fn statusdeck_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("statusdeck");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    for var in [
        "STATUSDECK_PROFILE",
        "STATUSDECK_SERVER",
        "STATUSDECK_TOKEN",
        "STATUSDECK_AUTHOR",
        "STATUSDECK_OUTPUT",
        "STATUSDECK_INSECURE",
        "STATUSDECK_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

/// One degraded service in a group, one healthy ungrouped service, one
/// open incident and nothing scheduled.
async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(envelope(json!({
            "user": {"id": "usr_1", "email": "ops@example.com", "name": "Ops", "role": "admin"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/services"))
        .respond_with(envelope(json!([
            {"id": "srv_api", "name": "API", "status": "degraded", "group": "grp_core"},
            {"id": "srv_web", "name": "Website", "status": "operational"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/service-groups"))
        .respond_with(envelope(json!([
            {"id": "grp_core", "name": "Core", "services": ["srv_api"]}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/incidents"))
        .respond_with(envelope(json!([{
            "id": "inc_1",
            "title": "API latency",
            "description": "Investigating increased latency",
            "status": "investigating",
            "severity": "major",
            "affectedServices": ["srv_api"],
            "createdAt": "2026-10-16T10:00:00Z",
            "updatedAt": "2026-10-16T10:00:00Z",
            "updates": [{
                "id": "upd_0",
                "message": "Investigating increased latency",
                "status": "investigating",
                "author": "Ops",
                "createdAt": "2026-10-16T10:00:00Z"
            }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/maintenance"))
        .respond_with(envelope(json!([])))
        .mount(&server)
        .await;

    server
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    statusdeck_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("status page")
                .and(predicate::str::contains("services"))
                .and(predicate::str::contains("incidents"))
                .and(predicate::str::contains("maintenance")),
        );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    statusdeck_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("statusdeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    for shell in ["bash", "fish"] {
        statusdeck_cmd(home.path())
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("statusdeck"));
    }
    statusdeck_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["--output", "xml", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("xml"));
}

#[test]
fn test_invalid_service_status_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["services", "set-status", "API", "on_fire"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config and credentials ──────────────────────────────────────────

#[test]
fn test_no_config_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["services", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("config init"));
}

#[test]
fn test_server_without_token_is_auth_error() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["--server", "http://127.0.0.1:9", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_config_show_without_file() {
    let home = TempDir::new().unwrap();
    statusdeck_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = TempDir::new().unwrap();
    statusdeck_cmd(home.path())
        .args(["config", "set", "server", "https://status.example.com"])
        .assert()
        .success();
    statusdeck_cmd(home.path())
        .args(["config", "set", "author", "On-call"])
        .assert()
        .success();

    statusdeck_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    statusdeck_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("server = \"https://status.example.com\"")
                .and(predicate::str::contains("author = \"On-call\"")),
        );
}

#[test]
fn test_config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["config", "set", "colour", "red"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("colour"));
}

#[test]
fn test_config_use_missing_profile() {
    let home = TempDir::new().unwrap();
    let output = statusdeck_cmd(home.path())
        .args(["config", "use", "staging"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("staging"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test]
async fn test_status_json() {
    let server = mock_backend().await;
    let home = TempDir::new().unwrap();
    let mut cmd = statusdeck_cmd(home.path());
    cmd.args(["--server", &server.uri(), "--token", "t", "-o", "json", "status"]);

    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["overall"], "degraded_performance");
    assert_eq!(summary["groups"][0]["name"], "Core");
    assert_eq!(summary["ungrouped"][0]["name"], "Website");
    assert_eq!(summary["active_incidents"][0]["id"], "inc_1");
}

#[tokio::test]
async fn test_status_table() {
    let server = mock_backend().await;
    let home = TempDir::new().unwrap();
    let mut cmd = statusdeck_cmd(home.path());
    cmd.args(["--server", &server.uri(), "--token", "t", "status"]);

    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Some systems experiencing degraded performance"));
    assert!(text.contains("Other services"));
    assert!(text.contains("Active incidents"));
    assert!(text.contains("API latency"));
}

#[tokio::test]
async fn test_whoami_reports_author() {
    let server = mock_backend().await;
    let home = TempDir::new().unwrap();
    let mut cmd = statusdeck_cmd(home.path());
    cmd.args([
        "--server",
        &server.uri(),
        "--token",
        "t",
        "--author",
        "Night shift",
        "whoami",
    ]);

    let output = run_blocking(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("ops@example.com"));
    assert!(text.contains("Author: Night shift"));
}

#[tokio::test]
async fn test_unknown_incident_is_not_found() {
    let server = mock_backend().await;
    let home = TempDir::new().unwrap();
    let mut cmd = statusdeck_cmd(home.path());
    cmd.args([
        "--server",
        &server.uri(),
        "--token",
        "t",
        "incidents",
        "get",
        "inc_missing",
    ]);

    let output = run_blocking(cmd).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("inc_missing"));
}
