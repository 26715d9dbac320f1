//! CLI tests: command functions called directly and the `mpa-report` binary
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

mod common;

use assert_cmd::Command;
use common::IKOYI;
use mpa_report::cli::{self, ContextFormat};
use mpa_report::ReportError;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp dir holding `mpa.csv` and `mpatemplate.docx`.
fn workspace(template_keys: &[&str]) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mpa.csv");
    let template = dir.path().join("mpatemplate.docx");
    std::fs::write(&input, common::zones_csv()).unwrap();
    std::fs::write(&template, common::docx_with_placeholders(template_keys)).unwrap();
    (dir, input, template)
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDER COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_render_writes_output() {
    let (dir, input, template) = workspace(&["title", "PBT_value3"]);
    let output = dir.path().join("out.docx");

    let written = cli::render(input, IKOYI.to_string(), template, Some(output.clone()), true).unwrap();
    assert_eq!(written, output);

    let xml = common::read_part(&std::fs::read(&output).unwrap(), "word/document.xml");
    assert!(xml.contains("title=IKOYI 1"));
    assert!(xml.contains("PBT_value3=50"));
}

#[test]
fn test_render_unknown_zone() {
    let (dir, input, template) = workspace(&["title"]);
    let result = cli::render(
        input,
        "Nowhere".to_string(),
        template,
        Some(dir.path().join("out.docx")),
        false,
    );
    assert!(matches!(result, Err(ReportError::NotFound { .. })));
    assert!(!dir.path().join("out.docx").exists());
}

#[test]
fn test_render_missing_template() {
    let (dir, input, _) = workspace(&["title"]);
    let result = cli::render(
        input,
        IKOYI.to_string(),
        dir.path().join("absent.docx"),
        None,
        false,
    );
    assert!(matches!(result, Err(ReportError::MissingTemplate(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTEXT AND CHECK-TEMPLATE COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_context_all_formats() {
    let (_dir, input, _) = workspace(&["title"]);
    for format in [ContextFormat::Table, ContextFormat::Json, ContextFormat::Yaml] {
        assert!(cli::context(input.clone(), IKOYI.to_string(), format).is_ok());
    }
}

#[test]
fn test_check_template_accepts_known_placeholders() {
    let (_dir, _, template) = workspace(&["title", "PBT_value1", "NXP_value4"]);
    assert!(cli::check_template(template).is_ok());
}

#[test]
fn test_check_template_rejects_unknown_placeholders() {
    let (_dir, _, template) = workspace(&["title", "GDP_value1"]);
    let err = cli::check_template(template).unwrap_err();
    assert!(err.to_string().contains("GDP_value1"));
}

// ═══════════════════════════════════════════════════════════════════════════
// BINARY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_binary_help() {
    Command::cargo_bin("mpa-report")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("check-template"));
}

#[test]
fn test_binary_version() {
    Command::cargo_bin("mpa-report")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_binary_context_json() {
    let (_dir, input, _) = workspace(&["title"]);
    Command::cargo_bin("mpa-report")
        .unwrap()
        .arg("context")
        .arg(&input)
        .args(["--zone", "ikoyi 1 total", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PBT_value3\": \"50\""));
}

#[test]
fn test_binary_render_default_output_name() {
    let (dir, input, template) = workspace(&["title"]);
    Command::cargo_bin("mpa-report")
        .unwrap()
        .current_dir(dir.path())
        .arg("render")
        .arg(&input)
        .args(["--zone", IKOYI])
        .arg("--template")
        .arg(&template)
        .assert()
        .success();
    assert!(dir.path().join("IKOYI_1_Report.docx").is_file());
}

#[test]
fn test_binary_unknown_zone_fails() {
    let (_dir, input, template) = workspace(&["title"]);
    Command::cargo_bin("mpa-report")
        .unwrap()
        .arg("render")
        .arg(&input)
        .args(["--zone", "Atlantis"])
        .arg("--template")
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data found for zone 'Atlantis'."));
}

#[test]
fn test_server_binary_help() {
    Command::cargo_bin("mpa-server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"));
}
