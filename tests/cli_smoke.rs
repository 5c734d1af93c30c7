use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"{
  "incomes": [
    {"name": "Walmart", "amount": 300,
     "schedule": {"type": "MONTHLY", "days": [1, 15]}}
  ],
  "expenses": [
    {"name": "Rent", "amount": 120,
     "schedule": {"type": "MONTHLY", "days": 1, "start": "2016-01-01"}},
    {"name": "groceries", "amount": 50,
     "schedule": {"type": "INTERVAL", "period": 7, "start": "2016-01-01"}}
  ]
}"#;

fn write_plan(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write plan");
    file
}

#[test]
fn plans_a_solvent_document() {
    let file = write_plan(SAMPLE);
    Command::cargo_bin("spendable_core_cli")
        .expect("binary")
        .args([
            file.path().to_str().expect("path"),
            "2016-01-01",
            "2016-02-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"solvent\": true"))
        .stdout(predicate::str::contains("smoothed_daily_spendable"));
}

#[test]
fn reads_from_stdin() {
    Command::cargo_bin("spendable_core_cli")
        .expect("binary")
        .args(["-", "2016-01-01", "2016-02-01"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"solvent\": true"));
}

#[test]
fn reports_insolvency_as_error_document() {
    let file = write_plan(&SAMPLE.replace(r#""amount": 50"#, r#""amount": 300"#));
    Command::cargo_bin("spendable_core_cli")
        .expect("binary")
        .args([
            file.path().to_str().expect("path"),
            "2016-01-01",
            "2016-02-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error\": \"Insolvent\""));
}

#[test]
fn rejects_malformed_schedules() {
    let file = write_plan(
        r#"{"expenses": [{"name": "rent", "amount": 50, "schedule": {"type": "MONTHLY"}}]}"#,
    );
    Command::cargo_bin("spendable_core_cli")
        .expect("binary")
        .args([
            file.path().to_str().expect("path"),
            "2016-01-01",
            "2016-02-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid schedule"));
}

#[test]
fn prints_usage() {
    Command::cargo_bin("spendable_core_cli")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
