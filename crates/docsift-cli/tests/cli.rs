//! End-to-end tests for the docsift binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn docsift() -> Command {
    Command::cargo_bin("docsift").unwrap()
}

const RECEIPT: &str = "WALMART SUPERCENTER\n\
    04/15/2024\n\
    Milk $3.49\n\
    Bread $2.99\n\
    Subtotal: $6.48\n\
    Tax: $0.52\n\
    Total: $7.00\n";

const LICENSE: &str = "CALIFORNIA DRIVER LICENSE\n\
    DL D1234567\n\
    LN SMITH FN JOHN\n\
    123 Main Street\n\
    Sacramento, CA 95814\n\
    DOB: 01/15/1980\n\
    EXP: 01/15/2030\n";

#[test]
fn process_receipt_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    docsift()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walmart"))
        .stdout(predicate::str::contains("7.00"))
        .stdout(predicate::str::contains("2024-04-15"));
}

#[test]
fn process_identity_card() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("license.txt");
    fs::write(&input, LICENSE).unwrap();

    docsift()
        .args([
            "process",
            input.to_str().unwrap(),
            "--kind",
            "identity",
            "--reference-date",
            "2026-08-25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"Driver's License""#))
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("D1234567"))
        .stdout(predicate::str::contains("1980-01-15"));
}

#[test]
fn process_reads_stdin() {
    docsift()
        .args(["process", "-"])
        .write_stdin("STARBUCKS\nTotal: $4.50\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starbucks"));
}

#[test]
fn process_confidence_is_clamped_into_record() {
    docsift()
        .args(["process", "-", "--confidence", "42.4"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""confidence":42"#));
}

#[test]
fn process_writes_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("record.json");
    fs::write(&input, RECEIPT).unwrap();

    docsift()
        .args([
            "process",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Walmart"));
}

#[test]
fn process_csv_and_text_formats() {
    docsift()
        .args(["process", "-", "--format", "csv"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor,amount,date"))
        .stdout(predicate::str::contains("Walmart"));

    docsift()
        .args(["process", "-", "--format", "text"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vendor: Walmart"))
        .stdout(predicate::str::contains("Confidence: 100%"));
}

#[test]
fn process_show_warnings_on_sparse_input() {
    docsift()
        .args(["process", "-", "--show-warnings"])
        .write_stdin("\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Warnings:"))
        .stderr(predicate::str::contains("vendor"));
}

#[test]
fn process_missing_input_fails() {
    docsift()
        .args(["process", "/nonexistent/receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_rejects_malformed_reference_date() {
    docsift()
        .args(["process", "-", "--reference-date", "15-04-2024"])
        .write_stdin(RECEIPT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --reference-date"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "SHELL\nTotal: $30.00\n").unwrap();

    docsift()
        .args([
            "batch",
            &format!("{}/*.txt", dir.path().display()),
            "--output-dir",
            out.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,receipt,Walmart"));
    assert!(summary.contains("b.txt,success,receipt,Shell"));
}

#[test]
fn batch_continue_on_error_keeps_going() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    // A directory with a .txt name forces a per-file read failure.
    fs::create_dir(dir.path().join("bad.txt")).unwrap();
    fs::write(dir.path().join("good.txt"), RECEIPT).unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    docsift()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    docsift()
        .args([
            "batch",
            &pattern,
            "--continue-on-error",
            "--output-dir",
            out.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("bad.txt,error"));
    assert!(summary.contains("good.txt,success"));
}

#[test]
fn batch_no_matches_fails() {
    let dir = tempdir().unwrap();

    docsift()
        .args(["batch", &format!("{}/*.txt", dir.path().display())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching text files"));
}
