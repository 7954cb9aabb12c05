//! Integration tests for the CLI interface
//!
//! Runs the built binary with small inputs to keep the suite fast.

use assert_cmd::Command;
use predicates::prelude::*;

fn parsum() -> Command {
    Command::cargo_bin("parsum").unwrap()
}

fn stdout_sum(output: &std::process::Output) -> f64 {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}

#[test]
fn default_run_prints_a_single_sum_line() {
    let output = parsum()
        .args(["-n", "1000", "-r", "100", "-w", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!((stdout_sum(&output) - 1000.0).abs() < 1e-3);
}

#[test]
fn explicit_chunk_size_is_honored() {
    let output = parsum()
        .args(["-n", "1000", "-r", "100", "-w", "4", "-c", "100"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!((stdout_sum(&output) - 1000.0).abs() < 1e-3);
}

#[test]
fn stats_flag_reports_dispatch_units_on_stderr() {
    parsum()
        .args(["-n", "1000", "-r", "10", "-w", "2", "-c", "100", "--stats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatch units: 10 created"));
}

#[test]
fn json_flag_emits_the_outcome_report() {
    let output = parsum()
        .args(["-n", "100", "-r", "100", "-w", "2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let report: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert!((report["sum"].as_f64().unwrap() - 100.0).abs() < 1e-3);
    assert!(report["stats"]["units_created"].as_u64().unwrap() >= 1);
}

#[test]
fn zero_workers_is_rejected_before_any_output() {
    parsum()
        .args(["-n", "100", "-w", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("workers"));
}

#[test]
fn zero_chunk_size_is_rejected() {
    parsum()
        .args(["-n", "100", "-c", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk_size"));
}

#[test]
fn compare_runs_all_four_scenarios() {
    parsum()
        .args(["compare", "-n", "1000", "-r", "20", "-w", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sequential"))
        .stdout(predicate::str::contains("per-element, 1 worker"))
        .stdout(predicate::str::contains("per-element, parallel"))
        .stdout(predicate::str::contains("chunked, parallel"))
        .stdout(predicate::str::contains("speedup"));
}

#[test]
fn help_shows_usage_and_compare_command() {
    parsum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("compare"));
}
