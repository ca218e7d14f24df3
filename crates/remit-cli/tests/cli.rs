//! Binary-level tests for the `remit` CLI.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use remit_core::pdf::write_text_pdf;
use tempfile::TempDir;

fn remit() -> Command {
    let mut cmd = Command::cargo_bin("remit").unwrap();
    cmd.env_remove("REMIT_LOG");
    cmd
}

fn write_pdf(path: &Path, lines: &[&str]) {
    fs::write(path, write_text_pdf(&[lines]).unwrap()).unwrap();
}

const EOB: &[&str] = &[
    "ACME MEDICAL GROUP",
    "01.235$ :tnuomA ecarT",
    "Trace Number 8812345678",
    "Printed 03/14/2024",
    "SERVICE PL NUM. SUBMITTED NEGOTIATED COPAY",
    "DATES CODE CHARGES",
    "01/02/2024 99213 $150.00",
    "01/02/2024 87070 $182.10",
    "01/09/2024 J1100 $200.00",
    "Claim Totals $532.10",
];

/// Config that reads text with lopdf only, for stable line output.
fn lopdf_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"pdf": {"primary": "lopdf"}}"#).unwrap();
    path.display().to_string()
}

#[test]
fn test_help_lists_commands() {
    remit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_process_missing_file() {
    remit()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_rejects_non_pdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "hello").unwrap();

    remit()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a PDF"));
}

#[test]
fn test_process_json_record() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("acme.pdf");
    write_pdf(&pdf, EOB);
    let config = lopdf_config(&dir);

    let output = remit()
        .args(["--config", &config, "process"])
        .arg(&pdf)
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["File Name"], "acme.pdf");
    assert_eq!(record["Insurance Name"], "Aetna");
    assert_eq!(record["Practice Name"], "ACME MEDICAL GROUP");
    assert_eq!(record["Check #"], "8812345678");
    assert_eq!(record["Check Date"], "03/14/2024");
    assert_eq!(record["Claim Count"], 3);
    assert_eq!(record["Line Count"], 1);
    assert_eq!(record["Check Amount"], "532.10");
}

#[test]
fn test_process_insurance_override_and_text_output() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("acme.pdf");
    write_pdf(&pdf, EOB);
    let config = lopdf_config(&dir);

    remit()
        .args(["--config", &config, "process", "--insurance", "Cigna", "--format", "text"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance:  Cigna"))
        .stdout(predicate::str::contains("Claims:     3"));
}

#[test]
fn test_process_default_pipeline_reports_file_name() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("plain.pdf");
    write_pdf(&pdf, &["ACME MEDICAL GROUP"]);
    let config = dir.path().join("absent.json");
    fs::write(&config, "{}").unwrap();

    remit()
        .args(["--config", config.to_str().unwrap(), "process"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"File Name\": \"plain.pdf\""));
}

#[test]
fn test_batch_csv_with_failure() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), EOB);
    write_pdf(&dir.path().join("b.pdf"), &["NORTH SHORE PEDIATRICS", "Page 1 of 2"]);
    fs::write(dir.path().join("c.pdf"), "not really a pdf").unwrap();
    let config = lopdf_config(&dir);
    let pattern = format!("{}/*.pdf", dir.path().display());
    let summary = dir.path().join("summary.csv");

    let output = remit()
        .args(["--config", &config, "batch", &pattern, "--summary"])
        .arg(&summary)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("File Name,Insurance Name,Practice Name,Check #"));
    assert!(lines[1].starts_with("a.pdf,Aetna,ACME MEDICAL GROUP,8812345678,03/14/2024,3,1,532.10"));
    assert!(lines[2].starts_with("b.pdf,Aetna,NORTH SHORE PEDIATRICS,,,0,2,"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("c.pdf"));

    let summary_text = fs::read_to_string(&summary).unwrap();
    assert!(summary_text.contains("c.pdf,error"));
    assert!(summary_text.contains("a.pdf,success"));
}

#[test]
fn test_batch_fail_fast() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), EOB);
    fs::write(dir.path().join("broken.pdf"), "garbage").unwrap();
    let config = lopdf_config(&dir);
    let pattern = format!("{}/*.pdf", dir.path().display());

    remit()
        .args(["--config", &config, "batch", &pattern, "--fail-fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed for broken.pdf"));
}

#[test]
fn test_batch_fail_fast_skips_remaining_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_broken.pdf"), "garbage").unwrap();
    write_pdf(&dir.path().join("b.pdf"), EOB);
    write_pdf(&dir.path().join("c.pdf"), EOB);
    let config = lopdf_config(&dir);
    let pattern = format!("{}/*.pdf", dir.path().display());
    let summary = dir.path().join("summary.csv");

    remit()
        .args(["--config", &config, "batch", &pattern, "--fail-fast", "-j", "1", "--summary"])
        .arg(&summary)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    let summary_text = fs::read_to_string(&summary).unwrap();
    assert_eq!(summary_text.lines().count(), 2);
    assert!(summary_text.contains("a_broken.pdf,error"));
    assert!(!summary_text.contains("b.pdf"));
}

#[test]
fn test_batch_output_dir_json() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), EOB);
    let config = lopdf_config(&dir);
    let out_dir = dir.path().join("out");

    remit()
        .args(["--config", &config, "batch", "--format", "json", "-d"])
        .arg(&out_dir)
        .arg(dir.path().join("a.pdf"))
        .assert()
        .success();

    let written: Vec<_> = fs::read_dir(&out_dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(written.len(), 1);
    let name = written[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("remittance_") && name.ends_with(".json"));

    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(records[0]["Claim Count"], 3);
}

#[test]
fn test_inspect_annotates_lines() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("acme.pdf");
    write_pdf(&pdf, EOB);
    let config = lopdf_config(&dir);

    remit()
        .args(["--config", &config, "inspect", "--annotated-only"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Trace Amount: $532.10"))
        .stdout(predicate::str::contains("reversed"))
        .stdout(predicate::str::contains("Block 1: lines 4..9, 3 service rows"));
}

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");
    let config = config.to_str().unwrap();

    remit()
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    remit()
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    remit()
        .args(["--config", config, "config", "set", "batch.jobs", "8"])
        .assert()
        .success();

    remit()
        .args(["--config", config, "config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));

    remit()
        .args(["--config", config, "config", "set", "batch.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_rejects_zero_jobs() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    remit()
        .args(["--config", config, "config", "set", "batch.jobs", "0"])
        .assert()
        .failure();
    assert!(!Path::new(config).exists());
}
