//! End-to-end CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("brcx")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_process_missing_file_fails() {
    Command::cargo_bin("brcx")
        .unwrap()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_batch_with_no_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf");

    Command::cargo_bin("brcx")
        .unwrap()
        .args(["batch", pattern.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}

#[test]
fn test_config_show_prints_defaults() {
    Command::cargo_bin("brcx")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_text_length"));
}
