//! CLI integration tests for the repara binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

/// Nine quiet HVAC units plus one hot unit: a guaranteed consensus outlier.
fn hot_unit_json() -> String {
    let mut records = Vec::new();
    for i in 0..9 {
        records.push(format!(
            r#"{{"equipment_id":"AHU-{:02}","category":"HVAC","create_date":"2024-01-01","cost":100.0}}"#,
            i
        ));
        records.push(format!(
            r#"{{"equipment_id":"AHU-{:02}","category":"HVAC","create_date":"2024-01-31","cost":100.0}}"#,
            i
        ));
    }
    for day in 1..=20 {
        records.push(format!(
            r#"{{"equipment_id":"AHU-99","category":"HVAC","create_date":"2024-01-{:02}","cost":800.0}}"#,
            day
        ));
    }
    format!("[{}]", records.join(","))
}

#[test]
fn test_cli_text_summary_reports_the_outlier() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Equipment Cost Reduction Analysis"))
        .stdout(predicate::str::contains("Consensus outliers:   1"))
        .stdout(predicate::str::contains("AHU-99"))
        .stdout(predicate::str::contains("warrant review"));
}

#[test]
fn test_cli_json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    let mut cmd = Command::cargo_bin("repara").unwrap();
    let output = cmd
        .arg("--format")
        .arg("json")
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["outliers"].as_array().unwrap().len(), 1);
    assert_eq!(report["outliers"][0]["equipment_id"], "AHU-99");
    assert_eq!(report["baselines"].as_array().unwrap().len(), 1);
    assert_eq!(report["recommendations"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_baselines_table() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg("--baselines").arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Category Baselines"))
        .stdout(predicate::str::contains("HVAC"));
}

#[test]
fn test_cli_all_flag_lists_every_equipment() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg("--all").arg("--top").arg("20").arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All Equipment by Priority"))
        .stdout(predicate::str::contains("AHU-00"))
        .stdout(predicate::str::contains("AHU-99"));
}

#[test]
fn test_cli_avg_days_per_month_scales_frequencies() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    // The hot unit runs 20 work orders over a 20-day window, so its
    // monthly rate equals the days-per-month constant exactly.
    let mut cmd = Command::cargo_bin("repara").unwrap();
    let output = cmd
        .arg("--format")
        .arg("json")
        .arg("--avg-days-per-month")
        .arg("60.88")
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let freq = report["outliers"][0]["frequency_per_month"].as_f64().unwrap();
    assert!((freq - 60.88).abs() < 1e-9);
}

#[test]
fn test_cli_rejects_invalid_weights() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "snapshot.json", &hot_unit_json());

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg("--weight-frequency")
        .arg("0.9")
        .arg("--weight-cost")
        .arg("0.9")
        .arg("--weight-outlier")
        .arg("0.9")
        .arg(&snapshot);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("sum to 1.0"));
}

#[test]
fn test_cli_rejects_missing_snapshot() {
    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg("does-not-exist.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read snapshot"));
}

#[test]
fn test_cli_rejects_malformed_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "broken.json", "{not json");

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg(&snapshot);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid work-order snapshot"));
}

#[test]
fn test_cli_empty_snapshot_is_valid() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, "empty.json", "[]");

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("all equipment within normal ranges"));
}

#[test]
fn test_cli_skipped_equipment_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let json = format!(
        "[{},{}]",
        r#"{"equipment_id":"GHOST-1","category":"","create_date":"2024-01-01"}"#,
        r#"{"equipment_id":"AHU-01","category":"HVAC","create_date":"2024-01-01","cost":100.0}"#
    );
    let snapshot = write_snapshot(&dir, "snapshot.json", &json);

    let mut cmd = Command::cargo_bin("repara").unwrap();
    cmd.arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipped equipment"))
        .stdout(predicate::str::contains("GHOST-1"));
}
