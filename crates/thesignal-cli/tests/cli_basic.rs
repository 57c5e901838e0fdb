//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_thesignal"))
        .env("THESIGNAL_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

const DAY_22: &str = "2024-01-22T09:00:00Z";

#[test]
fn test_status_before_activation() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["status"]);
    assert!(out.contains("not activated"));
}

#[test]
fn test_activate_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["activate", "--date", "2024-01-01"]);
    assert!(out.contains("activated: 2024-01-01"));

    let (_, stderr, code) = run_cli(home.path(), &["activate", "--date", "2024-02-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already set"));
}

#[test]
fn test_due_then_receive() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["config", "set", "minor.enabled", "false"]);
    run_ok(home.path(), &["activate", "--date", "2024-01-01"]);

    let out = run_ok(home.path(), &["due", "--json", "--now", DAY_22]);
    let due: serde_json::Value = serde_json::from_str(&out).unwrap();
    let indices: Vec<u64> = due
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["index"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1]);

    let out = run_ok(home.path(), &["receive", "0", "--now", DAY_22]);
    assert!(out.contains("received: major #0"));
    assert!(out.contains("INITIATED"));

    let (_, stderr, code) = run_cli(home.path(), &["receive", "2", "--now", DAY_22]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not due"));

    let out = run_ok(home.path(), &["status", "--json", "--now", DAY_22]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["major"]["signals_received"], 1);
    assert_eq!(status["major"]["time_until_next"]["status"], "ready");
    assert!(status.get("minor").is_none());
}

#[test]
fn test_minor_track_carries_no_access_tier() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["activate", "--date", "2024-01-01"]);
    for index in 0..10 {
        let index = index.to_string();
        run_ok(home.path(), &["receive", "--minor", &index, "--now", DAY_22]);
    }

    let out = run_ok(home.path(), &["status", "--json", "--now", DAY_22]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["minor"]["signals_received"], 10);
    assert!(status["minor"].get("tier").is_none());
    assert_eq!(status["major"]["tier"]["name"], "PUBLIC");
    assert_eq!(status["next_tier"]["name"], "INITIATED");

    let out = run_ok(home.path(), &["status", "--now", DAY_22]);
    assert!(out.contains("Access:     PUBLIC (level 0)"));
    assert!(out.contains("Next tier:  INITIATED at 1 signals"));
    assert!(!out.contains("SIGNAL_MASTER"));
}

#[test]
fn test_sync_in_automatic_mode() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["config", "set", "delivery.mode", "automatic"]);
    run_ok(home.path(), &["config", "set", "minor.enabled", "false"]);
    run_ok(home.path(), &["activate", "--date", "2024-01-01"]);

    let out = run_ok(home.path(), &["sync", "--json", "--now", DAY_22]);
    let events: serde_json::Value = serde_json::from_str(&out).unwrap();
    let delivered = events
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "SignalDelivered")
        .count();
    assert_eq!(delivered, 2);

    let out = run_ok(home.path(), &["sync", "--now", "2024-02-12T09:00:00Z"]);
    assert!(out.contains("2024-02-12 09:00  received: major #2"));

    let out = run_ok(home.path(), &["sync", "--now", "2024-02-12T09:00:00Z"]);
    assert!(out.contains("nothing to deliver"));

    let out = run_ok(home.path(), &["signal", "1"]);
    assert!(out.contains("RECOGNITION SIGNAL"));
    let (_, _, code) = run_cli(home.path(), &["signal", "3"]);
    assert_eq!(code, 1);
}

#[test]
fn test_schedule_lists_every_release() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["activate", "--date", "2024-01-01"]);
    let out = run_ok(home.path(), &["schedule", "--json", "--now", DAY_22]);
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[1]["release_date"], "2024-01-22");
    assert_eq!(rows[8]["days_from_signup"], 168);
    assert_eq!(rows[2]["released"], false);

    let out = run_ok(home.path(), &["schedule", "--now", DAY_22]);
    assert!(out.contains("major track spans 168 days"));
    let out = run_ok(home.path(), &["schedule", "--minor", "--now", DAY_22]);
    assert!(out.contains("minor track spans 167 days"));
}

#[test]
fn test_transmission_is_reproducible_with_seed() {
    let home = tempfile::tempdir().unwrap();
    let a = run_ok(home.path(), &["transmission", "--seed", "99"]);
    let b = run_ok(home.path(), &["transmission", "--seed", "99"]);
    assert_eq!(a, b);
    assert!(!a.trim().is_empty());
}

#[test]
fn test_config_roundtrip_and_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(
        run_ok(home.path(), &["config", "get", "schedule.interval_days"]).trim(),
        "21"
    );
    run_ok(home.path(), &["config", "set", "schedule.interval_days", "7"]);
    assert_eq!(
        run_ok(home.path(), &["config", "get", "schedule.interval_days"]).trim(),
        "7"
    );
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["config", "set", "delivery.mode", "sometimes"]);
    assert_eq!(code, 1);
    run_ok(home.path(), &["config", "reset"]);
    assert_eq!(
        run_ok(home.path(), &["config", "get", "delivery.mode"]).trim(),
        "acknowledge"
    );
}

#[test]
fn test_tiers_table() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["tiers"]);
    assert!(out.contains("SIGNAL_MASTER"));
    let out = run_ok(home.path(), &["tiers", "--grades"]);
    assert!(out.contains("ADEPT"));
}
