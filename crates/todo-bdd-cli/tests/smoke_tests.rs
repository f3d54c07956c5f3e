//! Smoke tests for the todo-bdd CLI
//!
//! These tests verify the binary end to end: argument parsing, feature
//! discovery, scenario execution and exit codes.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the todo-bdd binary
fn todo_bdd() -> Command {
    let mut cmd = Command::cargo_bin("todo-bdd").expect("todo-bdd binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("TODO_BDD_BASE_URL");
    cmd
}

fn shipped_features() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../features")
}

fn write_feature(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const PASSING: &str = r#"
name: Counting
scenarios:
  - name: two items
    steps:
      - Given Jane opens the Todo Application
      - When she adds 'buy milk'
      - And she adds 'walk dog'
      - Then the remaining item count should show '2 items left'
"#;

const FAILING: &str = r#"
name: Miscounting
scenarios:
  - name: wrong count
    steps:
      - Given Jane opens the Todo Application
      - When she adds 'buy milk'
      - Then the remaining item count should show '5 items left'
"#;

const UNDEFINED: &str = r#"
name: Dancing
scenarios:
  - name: dance
    steps:
      - Given Jane opens the Todo Application
      - When she dances the tango
"#;

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    todo_bdd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_help_flag() {
    todo_bdd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("steps"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_no_args_shows_help() {
    todo_bdd().assert().failure(); // Requires a subcommand
}

#[test]
fn test_run_requires_files() {
    todo_bdd().arg("run").assert().failure();
}

// ============================================================================
// steps
// ============================================================================

#[test]
fn test_steps_lists_vocabulary() {
    todo_bdd()
        .arg("steps")
        .assert()
        .success()
        .stdout(predicate::str::contains("When she adds {string}"))
        .stdout(predicate::str::contains("the page title should include {string}"))
        .stdout(predicate::str::contains("e.g. Given James opens the Todo Application"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_shipped_features() {
    todo_bdd()
        .args(["--color", "never", "run"])
        .arg(shipped_features())
        .assert()
        .success()
        .stderr(predicate::str::contains("PASSED"));
}

#[test]
fn test_run_passing_file() {
    let dir = TempDir::new().unwrap();
    let path = write_feature(&dir, "counting.yaml", PASSING);
    todo_bdd()
        .args(["--color", "never", "run"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("PASS two items"));
}

#[test]
fn test_run_failing_file() {
    let dir = TempDir::new().unwrap();
    let path = write_feature(&dir, "miscounting.yaml", FAILING);
    todo_bdd()
        .args(["--color", "never", "run"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("FAIL wrong count"))
        .stderr(predicate::str::contains("5 items left"));
}

#[test]
fn test_run_verbose_lists_steps() {
    let dir = TempDir::new().unwrap();
    let path = write_feature(&dir, "counting.yaml", PASSING);
    todo_bdd()
        .args(["--color", "never", "-v", "run"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("PASSED When she adds 'buy milk'"));
}

#[test]
fn test_run_json_format() {
    let dir = TempDir::new().unwrap();
    let path = write_feature(&dir, "counting.yaml", PASSING);
    let output = todo_bdd()
        .args(["run", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["features"][0]["name"], "Counting");
    assert_eq!(
        report["features"][0]["scenarios"][0]["steps"][1]["outcome"]["status"],
        "passed"
    );
}

#[test]
fn test_run_fail_fast_reports_later_features_as_skipped() {
    let dir = TempDir::new().unwrap();
    let failing = write_feature(&dir, "miscounting.yaml", FAILING);
    let passing = write_feature(&dir, "counting.yaml", PASSING);
    let output = todo_bdd()
        .args(["run", "--fail-fast", "--format", "json"])
        .arg(&failing)
        .arg(&passing)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let features = report["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[1]["name"], "Counting");
    assert_eq!(
        features[1]["scenarios"][0]["steps"][0]["outcome"]["status"],
        "skipped"
    );
}

#[test]
fn test_run_undefined_step_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_feature(&dir, "dancing.yaml", UNDEFINED);
    todo_bdd()
        .args(["--color", "never", "run"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined step"));
}

#[test]
fn test_run_missing_file() {
    todo_bdd()
        .args(["run", "/no/such/feature.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such feature file"));
}

#[test]
fn test_run_with_harness_config() {
    let dir = TempDir::new().unwrap();
    let feature = write_feature(&dir, "counting.yaml", PASSING);
    let harness = write_feature(&dir, "harness.yaml", "base_url: http://todo.test\n");
    todo_bdd()
        .args(["-q", "run"])
        .arg(&feature)
        .arg("--config")
        .arg(&harness)
        .assert()
        .success();
}

#[test]
fn test_run_with_bad_harness_config() {
    let dir = TempDir::new().unwrap();
    let feature = write_feature(&dir, "counting.yaml", PASSING);
    todo_bdd()
        .args(["run"])
        .arg(&feature)
        .args(["--config", "/no/such/harness.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_shipped_features() {
    todo_bdd()
        .args(["--color", "never", "check"])
        .arg(shipped_features())
        .assert()
        .success()
        .stderr(predicate::str::contains("every step defined"));
}

#[test]
fn test_check_reports_undefined() {
    let dir = TempDir::new().unwrap();
    write_feature(&dir, "dancing.yaml", UNDEFINED);
    todo_bdd()
        .args(["--color", "never", "check"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("When she dances the tango"))
        .stderr(predicate::str::contains("Check failed"));
}
