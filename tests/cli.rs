//! End-to-end tests for the boxbreath binary.
//!
//! Every test points `BOXBREATH_HOME` at a fresh temp directory so the
//! user's real configuration is never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn boxbreath(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("boxbreath").unwrap();
    cmd.env("BOXBREATH_HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("tracks"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn config_path_uses_home_override() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"))
        .stdout(predicate::str::contains(
            home.path().to_string_lossy().as_ref(),
        ));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    boxbreath(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.yaml").exists());

    boxbreath(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    boxbreath(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn tracks_as_json_lists_catalog() {
    let home = TempDir::new().unwrap();
    let output = boxbreath(&home)
        .args(["tracks", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let tracks = value.as_array().unwrap();
    assert_eq!(tracks.len(), 9);
    assert!(tracks.iter().all(|t| t["present"] == false));
    assert!(tracks
        .iter()
        .any(|t| t["id"] == "gentle-piano" && t["music"] == true));
    assert!(tracks
        .iter()
        .any(|t| t["id"] == "phase-inhale" && t["music"] == false));
}

#[test]
fn plain_session_runs_to_completion() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["start", "-d", "1s", "-p", "1", "--plain", "--no-audio"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Inhale"))
        .stdout(predicate::str::contains("Session complete"));
}

#[test]
fn plain_session_json_summary() {
    let home = TempDir::new().unwrap();
    let output = boxbreath(&home)
        .args(["-o", "json", "start", "-d", "1s", "-p", "1", "--plain", "--no-audio"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["completed"], true);
    assert_eq!(value["config"]["pace_secs"], 1);
}

#[test]
fn zero_pace_is_rejected() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["start", "--pace", "0", "--plain"])
        .assert()
        .failure();
}

#[test]
fn bad_duration_is_reported() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["start", "-d", "soon", "--plain", "--no-audio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn huge_duration_is_reported() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["start", "-d", "9999999999999999h", "--plain", "--no-audio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    boxbreath(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boxbreath"));
}
