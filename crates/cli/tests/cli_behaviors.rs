use assert_cmd::Command;
use predicates::prelude::*;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn fixture_path() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/sample_audit")
}

fn temp_out(tag: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("greendc-out-{tag}-{nonce}"))
}

#[test]
fn cli_audit_writes_reports_and_exits_0_without_gate() {
    let out = temp_out("basic");

    let mut cmd = Command::cargo_bin("greendc").unwrap();
    cmd.args([
        "audit",
        "--notes",
        fixture_path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--output-format",
        "all",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pue=1.667"))
        .stdout(predicate::str::contains("dcie=60.0"))
        .stdout(predicate::str::contains("co2_tonnes=390.0"));

    assert!(out.join("report.json").exists());
    assert!(out.join("report.md").exists());

    let json = fs::read_to_string(out.join("report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["recommendations"].as_array().unwrap().len(), 4);
    assert_eq!(report["workload"]["outcome"]["status"], "COMPLETE");

    let _ = fs::remove_dir_all(out);
}

#[test]
fn cli_audit_exits_2_when_pue_gate_fails() {
    let out = temp_out("gate");

    let mut cmd = Command::cargo_bin("greendc").unwrap();
    cmd.args([
        "audit",
        "--notes",
        fixture_path().to_str().unwrap(),
        "--target-pue",
        "1.2",
        "--out",
        out.to_str().unwrap(),
    ]);

    cmd.assert().code(2);

    let _ = fs::remove_dir_all(out);
}

#[test]
fn cli_audit_flags_only_reports_fallback_recommendation() {
    let out = temp_out("flags");

    let mut cmd = Command::cargo_bin("greendc").unwrap();
    cmd.args([
        "audit",
        "--cpu",
        "80",
        "--cooling-setpoint",
        "25",
        "--aisle-containment",
        "true",
        "--virtualization",
        "90",
        "--out",
        out.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("savings_pct=0.0"));

    let json = fs::read_to_string(out.join("report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    let recs = report["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["estimated_saving_pct"], 0.0);

    let _ = fs::remove_dir_all(out);
}

#[test]
fn cli_audit_fails_cleanly_on_missing_notes_dir() {
    let out = temp_out("missing");

    let mut cmd = Command::cargo_bin("greendc").unwrap();
    cmd.args([
        "audit",
        "--notes",
        "no/such/dir",
        "--out",
        out.to_str().unwrap(),
    ]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("failed to scan notes"));
}
