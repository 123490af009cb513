use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn replay_json(extra: &[&str]) -> Value {
    let input = Path::new("tests/fixtures/checkout.json");
    assert!(input.exists(), "fixture missing");

    let mut cmd = Command::cargo_bin("autofill-replay").expect("binary built");
    let assert = cmd
        .args(["--output", "json"])
        .args(extra)
        .args(["replay", input.to_str().unwrap(), "--metrics"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn replay_emits_notifications_and_reports() {
    let value = replay_json(&[]);

    let kinds: Vec<&str> = value["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "cancel",
            "view_entered",
            "session_started",
            "value_changed",
            "value_changed",
            "view_exited",
            "cancel",
            "view_entered",
            "session_started",
            "value_changed",
            "commit",
        ]
    );

    let reports = value["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(
        reports[0]["outcome"].as_str(),
        Some("suggestion_used_form_unchanged_not_submitted")
    );
    assert_eq!(reports[0]["scope"]["form"].as_str(), Some("checkout"));
    assert_eq!(
        reports[1]["outcome"].as_str(),
        Some("no_suggestion_form_changed_submitted")
    );
    assert_eq!(reports[1]["submission"].as_str(), Some("form_submission"));

    let metrics = value["metrics"].as_str().unwrap();
    let outcome_line =
        "autofill_session_outcome_total{outcome=\"no-suggestion.form-changed.submitted\"} 1";
    assert!(metrics.contains(outcome_line));
    assert!(metrics.contains("autofill_submission_source_total{source=\"form_submission\"} 1"));
}

#[test]
fn policy_file_suppresses_implicit_cancels() {
    let value = replay_json(&["--policy", "tests/fixtures/skip_cancel.yaml"]);
    let first = &value["notifications"][0];
    assert_eq!(first["kind"].as_str(), Some("view_entered"));

    let cancels = value["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "cancel")
        .count();
    assert_eq!(cancels, 0, "switching forms is silent as well");
    assert_eq!(value["reports"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_scenario_fails_with_context() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let mut cmd = Command::cargo_bin("autofill-replay").expect("binary built");
    let assert = cmd
        .args(["replay", missing.to_str().unwrap()])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("failed to read scenario"), "stderr: {}", stderr);
}

#[test]
fn outcomes_lists_eight_ordinals() {
    let mut cmd = Command::cargo_bin("autofill-replay").expect("binary built");
    let assert = cmd.args(["outcomes", "--output", "json"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    for (idx, row) in rows.iter().enumerate() {
        assert_eq!(row["ordinal"].as_u64(), Some(idx as u64));
    }
    assert_eq!(
        rows[4]["label"].as_str(),
        Some("suggestion-used.form-changed.submitted")
    );
}

#[test]
fn policy_command_applies_cli_overrides() {
    let mut cmd = Command::cargo_bin("autofill-replay").expect("binary built");
    let assert = cmd
        .args([
            "policy",
            "--set",
            "session.navigation_classifier=same_document",
            "--set",
            "bus.capacity=16",
            "-o",
            "json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let policy: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        policy["session"]["navigation_classifier"].as_str(),
        Some("same_document")
    );
    assert_eq!(policy["bus"]["capacity"].as_u64(), Some(16));
    assert_eq!(
        policy["provenance"]["bus.capacity"]["source"].as_str(),
        Some("Cli")
    );
}

#[test]
fn invalid_override_is_rejected() {
    let mut cmd = Command::cargo_bin("autofill-replay").expect("binary built");
    cmd.args(["policy", "--set", "bus.capacity=0"])
        .assert()
        .failure();
}
