//! CLI integration tests
//!
//! These run without a libcurl: they cover argument handling and the
//! failure path when the library cannot be loaded.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn curled() -> Command {
    let mut cmd = Command::cargo_bin("curled").unwrap();
    cmd.env_remove("LIBCURL_LIBRARY_PATH")
        .env_remove("CURLED_LOG")
        .env_remove("CURLED_JSON");
    cmd
}

// ============================================================================
// Help and arguments
// ============================================================================

#[test]
fn test_help_lists_commands() {
    curled()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("trace"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("--library"));
}

#[test]
fn test_fetch_help_lists_flags() {
    curled()
        .args(["fetch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--header"))
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version_flag() {
    curled()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("curled "));
}

#[test]
fn test_fetch_requires_url() {
    curled()
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<URL>"));
}

#[test]
fn test_unknown_command() {
    curled().arg("upload").assert().failure();
}

// ============================================================================
// Library loading
// ============================================================================

#[test]
fn test_missing_library_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("libcurl-missing.so");

    curled()
        .current_dir(temp_dir.path())
        .arg("--library")
        .arg(&missing)
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load libcurl"))
        .stderr(predicate::str::contains("libcurl-missing.so"));
}

#[test]
fn test_library_path_from_project_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("curled.toml"),
        "[library]\npath = \"/nonexistent/configured/libcurl.so.4\"\n",
    )
    .unwrap();

    curled()
        .current_dir(temp_dir.path())
        .args(["trace", "http://example.test/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configured/libcurl.so.4"));
}

#[test]
fn test_invalid_project_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("curled.toml"),
        "[transfer]\nmax_redirs = -1\n",
    )
    .unwrap();

    curled()
        .current_dir(temp_dir.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
