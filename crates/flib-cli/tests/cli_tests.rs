//! Integration tests for flib-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use flib_core::test_utils::TarTestBuilder;
use flib_core::test_utils::create_test_tar;
use flib_core::test_utils::create_test_zip;
use flib_core::test_utils::gz;
use flib_core::test_utils::write_archive;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn flib_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("flib");
    cmd.env_remove("CI").env_remove("DEBUG").env_remove("VERBOSE");
    cmd
}

fn sample_tar_gz(temp: &TempDir) -> PathBuf {
    write_archive(
        temp.path(),
        "sample.tar.gz",
        &gz(&create_test_tar(vec![("hello.txt", b"hello"), ("data.bin", b"\x00\x01")])),
    )
}

fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is not valid JSON")
}

#[test]
fn test_version_flag() {
    flib_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flib"));
}

#[test]
fn test_help_flag() {
    flib_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_extract_help() {
    flib_cmd()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract archive contents"));
}

#[test]
fn test_extract_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);
    let out = temp.path().join("out");

    flib_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files extracted: 2"));

    assert_eq!(fs::read_to_string(out.join("hello.txt")).unwrap(), "hello");
    assert_eq!(fs::read(out.join("data.bin")).unwrap(), b"\x00\x01");
}

#[test]
fn test_extract_defaults_to_current_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(
        temp.path(),
        "cwd.zip",
        &create_test_zip(vec![("in-cwd.txt", b"x")]),
    );
    let cwd = temp.path().join("work");
    fs::create_dir(&cwd).unwrap();

    flib_cmd()
        .current_dir(&cwd)
        .arg("extract")
        .arg(&archive)
        .assert()
        .success();

    assert!(cwd.join("in-cwd.txt").is_file());
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);
    let out = temp.path().join("out");

    let output = flib_cmd()
        .arg("--json")
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["format"], "tar");
    assert_eq!(json["data"]["files_extracted"], 2);
    assert_eq!(json["data"]["bytes_written"], 7);
}

#[test]
fn test_extract_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    flib_cmd()
        .arg("extract")
        .arg(temp.path().join("missing.tar"))
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Archive not found"));
}

#[test]
fn test_extract_unsupported_suffix_lists_suffixes() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(temp.path(), "payload.bin", &create_test_tar(vec![("a", b"a")]));

    flib_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive"))
        .stderr(predicate::str::contains(".tar.gz"))
        .stderr(predicate::str::contains(".zip"));
}

#[test]
fn test_extract_forced_format_without_strict() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(temp.path(), "payload.bin", &create_test_tar(vec![("a", b"a")]));
    let out = temp.path().join("out");

    flib_cmd()
        .args(["extract", "--format", "tar", "--no-strict"])
        .arg(&archive)
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("a").is_file());
}

#[test]
fn test_extract_forced_format_is_strict_by_default() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(temp.path(), "bundle.zip", &create_test_zip(vec![("a", b"a")]));

    flib_cmd()
        .args(["extract", "--format", "tar"])
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive"));
}

#[test]
fn test_extract_no_strict_requires_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);

    flib_cmd()
        .args(["extract", "--no-strict"])
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format"));
}

#[test]
fn test_extract_rejects_path_traversal() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let data = TarTestBuilder::new()
        .add_raw_name("../escaped.txt", b"x")
        .build();
    let archive = write_archive(temp.path(), "evil.tar", &data);
    let out = temp.path().join("out");

    flib_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("path traversal"));

    assert!(!temp.path().join("escaped.txt").exists());
}

#[test]
fn test_extract_no_create_requires_existing_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);
    let out = temp.path().join("missing");

    flib_cmd()
        .args(["extract", "--no-create"])
        .arg(&archive)
        .arg(&out)
        .assert()
        .failure();

    assert!(!out.exists());
}

#[test]
fn test_extract_quiet_mode() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);

    flib_cmd()
        .args(["--quiet", "extract"])
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_reports_members() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let tar = sample_tar_gz(&temp);
    let zip = write_archive(temp.path(), "one.zip", &create_test_zip(vec![("a", b"a")]));

    let output = flib_cmd()
        .args(["--json", "check"])
        .arg(&tar)
        .arg(&zip)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["operation"], "check");
    assert_eq!(json["data"][0]["members"], 2);
    assert_eq!(json["data"][1]["format"], "zip");
    assert_eq!(json["data"][1]["members"], 1);
}

#[test]
fn test_check_fails_on_corrupt_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let good = write_archive(temp.path(), "good.zip", &create_test_zip(vec![("a", b"a")]));
    let bad = write_archive(temp.path(), "bad.zip", b"not a zip archive");

    flib_cmd()
        .arg("check")
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("good.zip: zip, 1 members"))
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("bad.zip"));
}

#[test]
fn test_check_json_failure_is_single_document() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bad = write_archive(temp.path(), "bad.zip", b"garbage");

    let output = flib_cmd()
        .args(["--json", "check"])
        .arg(&bad)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["status"], "error");
    assert!(json["data"][0]["error"].is_string());
}

#[test]
fn test_formats_lists_suffixes() {
    flib_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("tar"))
        .stdout(predicate::str::contains(".tar.zst"))
        .stdout(predicate::str::contains(".zip"));
}

#[test]
fn test_formats_json() {
    let output = flib_cmd().args(["--json", "formats"]).output().unwrap();

    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["data"][0]["name"], "tar");
    assert_eq!(json["data"][1]["name"], "zip");
    assert_eq!(json["data"][1]["suffixes"][0], ".zip");
}

#[test]
fn test_info_reads_environment_flags() {
    let output = flib_cmd()
        .env("CI", "true")
        .env("DEBUG", "0")
        .args(["--json", "info"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["operation"], "info");
    assert_eq!(json["data"]["ci"], true);
    assert_eq!(json["data"]["debug"], false);
    assert_eq!(json["data"]["posix"], cfg!(unix));
}

#[test]
fn test_info_human_output() {
    flib_cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Machine:"))
        .stdout(predicate::str::contains(std::env::consts::ARCH));
}

#[test]
fn test_completion_bash() {
    flib_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flib"));
}

#[test]
fn test_verbose_emits_debug_logs() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = sample_tar_gz(&temp);

    flib_cmd()
        .args(["-vvv", "extract"])
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stderr(predicate::str::contains("[DEBUG]"));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    flib_cmd()
        .args(["-q", "-v", "formats"])
        .assert()
        .failure();
}
