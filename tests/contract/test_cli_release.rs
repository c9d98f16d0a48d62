// Contract tests for `fipva prepare`, `fipva save` and `fipva submit`

use std::fs;

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

// Nothing listens on the discard port, so every request fails to connect
const UNREACHABLE_ROOT: &str = "http://127.0.0.1:9";

fn fipva(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fipva").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("FIPVA_ROOT")
        .env_remove("FIPVA_PROJECT_UUID")
        .env_remove("FIPVA_USER_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// Prepare answer with a questionnaire at 2.0.0, which is also the latest submitted version
fn mock_prepare(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/prepare-action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "questionnaireVersion": "2.0.0",
                "submittedVersions": [
                    {"uri": "https://w3id.org/np/RA1", "version": "1.0.0"},
                    {"uri": "https://w3id.org/np/RA2", "version": "2.0.0"}
                ]
            })
            .to_string(),
        )
        .create()
}

fn release_args<'a>(root: &'a str, command: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["--root", root, command, "--project-uuid", "p-1", "--user-token", "t-1"];
    args.extend_from_slice(extra);
    args
}

#[test]
fn test_save_rectifies_loose_version() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let root = server.url();
    let prepare = mock_prepare(&mut server);
    let save = server
        .mock("POST", "/api/save-version")
        .match_body(Matcher::PartialJson(json!({"version": "2.1.0"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true}).to_string())
        .create();

    fipva(&temp_dir)
        .args(release_args(&root, "save", &["--version", "v2.1"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("**2.1.0**"));

    prepare.assert();
    save.assert();
}

#[test]
fn test_submit_succeeds_when_submission_done() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let root = server.url();
    let _prepare = mock_prepare(&mut server);
    let submit = server
        .mock("POST", "/api/submit-version")
        .match_body(Matcher::PartialJson(json!({"version": "2.1.0"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"ok": true, "submissionDone": true, "submissionLocation": "http://x"}).to_string(),
        )
        .create();

    fipva(&temp_dir)
        .args(release_args(&root, "submit", &["--bump", "minor"]))
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("http://x"));

    submit.assert();
}

#[test]
fn test_submit_document_only_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let root = server.url();
    let _prepare = mock_prepare(&mut server);
    let submit = server
        .mock("POST", "/api/submit-version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true, "documentDone": true}).to_string())
        .create();

    fipva(&temp_dir)
        .args(release_args(&root, "submit", &["--bump", "patch"]))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Please submit the document manually"))
        .stderr(predicate::str::contains("Action finished without success"));

    submit.assert();
}

#[test]
fn test_save_not_above_latest_exits_with_validation_code() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let root = server.url();
    let _prepare = mock_prepare(&mut server);
    let save = server.mock("POST", "/api/save-version").expect(0).create();

    fipva(&temp_dir)
        .args(release_args(&root, "save", &["--version", "1.9"]))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "must be higher than the latest submitted version 2.0.0",
        ));

    save.assert();
}

#[test]
fn test_save_requires_version_or_bump() {
    let temp_dir = TempDir::new().unwrap();

    fipva(&temp_dir)
        .args(["save", "--project-uuid", "p-1", "--user-token", "t-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--version").or(predicate::str::contains("--bump")));
}

#[test]
fn test_save_rejects_version_and_bump_together() {
    let temp_dir = TempDir::new().unwrap();

    fipva(&temp_dir)
        .args([
            "save",
            "--project-uuid",
            "p-1",
            "--user-token",
            "t-1",
            "--version",
            "1.0.0",
            "--bump",
            "minor",
        ])
        .assert()
        .failure();
}

#[test]
fn test_prepare_reports_load_failure() {
    let temp_dir = TempDir::new().unwrap();

    fipva(&temp_dir)
        .args(["--root", UNREACHABLE_ROOT, "prepare", "--project-uuid", "p-1", "--user-token", "t-1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Failed to load versions. Please try again later."));
}

#[test]
fn test_submit_reads_session_from_env() {
    let temp_dir = TempDir::new().unwrap();

    fipva(&temp_dir)
        .env("FIPVA_PROJECT_UUID", "p-1")
        .env("FIPVA_USER_TOKEN", "t-1")
        .env("FIPVA_ROOT", UNREACHABLE_ROOT)
        .args(["submit", "--bump", "patch"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Failed to load versions"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    fipva(&temp_dir)
        .args(["--config", "missing.toml", "latest", "1.0.0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_root_in_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fipva.toml"), "root_url = \"localhost:8000\"\n").unwrap();

    fipva(&temp_dir)
        .args(["latest", "1.0.0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Root URL must start with http:// or https://"));
}
