//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusgarden-cli", "--quiet", "--"])
        .args(args)
        .env("FOCUSGARDEN_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_list_show_seeds_defaults() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["list", "show"]);
    assert_eq!(code, 0, "list show failed: {stderr}");

    let lists: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(!lists.as_array().unwrap().is_empty());
}

#[test]
fn test_blocklist_show() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["blocklist", "show"]);
    assert_eq!(code, 0);

    let lists: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(!lists.as_array().unwrap().is_empty());
}

#[test]
fn test_timer_status_idle() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);

    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["active"], false);
}

#[test]
fn test_timer_start_status_giveup_cycle() {
    let dir = TempDir::new().unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["timer", "start", "Quick Reading 25/5"]);
    assert_eq!(code, 0, "timer start failed: {stderr}");
    assert!(stdout.contains("SessionStarted"));

    let (stdout, _, code) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["active"], true);
    assert_eq!(snapshot["state"], "focus");

    // Starting on top of a running session is refused.
    let (_, stderr, code) = run_cli(dir.path(), &["timer", "start", "Quick Reading 25/5"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already active"));

    // Abandoning focus withers a plant and counts an interruption.
    let (stdout, _, code) = run_cli(dir.path(), &["timer", "give-up"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("SessionAbandoned"));

    let (stdout, _, code) = run_cli(dir.path(), &["garden", "show"]);
    assert_eq!(code, 0);
    let garden: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(garden.as_array().unwrap().len(), 1);
    assert_eq!(garden[0]["status"], "withered");

    let (stdout, _, code) = run_cli(dir.path(), &["stats", "today"]);
    assert_eq!(code, 0);
    let today: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(today["interrupted"], 1);
    assert_eq!(today["completed"], 0);
}

#[test]
fn test_prep_giveup_has_no_penalty() {
    let dir = TempDir::new().unwrap();

    let (_, _, code) = run_cli(dir.path(), &["timer", "start", "fl-reading", "--prep"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["timer", "give-up"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"penalized\": false"));

    let (stdout, _, _) = run_cli(dir.path(), &["garden", "show"]);
    let garden: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(garden.as_array().unwrap().is_empty());
}

#[test]
fn test_blocklist_check_during_focus() {
    let dir = TempDir::new().unwrap();

    // Idle: nothing is blocked.
    let (stdout, _, code) = run_cli(dir.path(), &["blocklist", "check", "twitter.com"]);
    assert_eq!(code, 0);
    let verdict: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(verdict["blocked"], false);

    // Focusing against the social list blocks it.
    let (_, _, code) = run_cli(dir.path(), &["timer", "start", "fl-reading"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["blocklist", "check", "twitter.com"]);
    let verdict: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(verdict["blocked"], true);

    let (stdout, _, _) = run_cli(dir.path(), &["blocklist", "check", "docs.rs"]);
    let verdict: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(verdict["blocked"], false);
}

#[test]
fn test_settings_roundtrip() {
    let dir = TempDir::new().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["notification_sound"], "bell");

    let (_, _, code) = run_cli(dir.path(), &["settings", "set", "--sound", "none"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(dir.path(), &["settings", "show"]);
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["notification_sound"], "none");
}
