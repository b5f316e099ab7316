//! Integration tests for the vmwaretool binary.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_vmwaretool, temp_config};

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_exits_0_and_lists_options() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_vmwaretool(home.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("--config-file"));
    assert!(stdout.contains("--loglevel"));
    assert!(stdout.contains("--disable-spinner"));
    assert!(stdout.contains("--completions"));
}

#[test]
fn version_shows_package_version() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_vmwaretool(home.path(), &["--version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with(&format!("vmwaretool {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn disabled_spinner_prints_nothing_but_the_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, path) = temp_config("[spinner]\nrandom = false\nstyle = \"moon\"\n");

    Command::cargo_bin("vmwaretool")?
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .arg("--config-file")
        .arg(&path)
        .args(["--disable-spinner", "--loglevel", "ERROR"])
        .assert()
        .success()
        .stdout(format!("config_file = {}\n", path.display()))
        .stderr(predicate::str::contains("spinner.style = moon"));
    Ok(())
}

#[test]
fn unknown_fixed_style_fails() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, path) = temp_config("[spinner]\nrandom = false\nstyle = \"sparkles\"\n");

    Command::cargo_bin("vmwaretool")?
        .env("HOME", dir.path())
        .arg("-c")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sparkles").and(predicate::str::contains("catalogue")));
    Ok(())
}

#[test]
fn completions_print_a_script() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_vmwaretool(home.path(), &["--completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("vmwaretool"));
    assert!(!stdout.contains("config_file ="));
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn explicit_config_is_echoed_and_loaded() {
    let (dir, path) = temp_config("[vmware]\nhost_ip = \"vc01.example.org\"\n");
    let path_str = path.to_str().unwrap();
    let (stdout, stderr, exit_code) =
        run_vmwaretool(dir.path(), &["-c", path_str, "--disable-spinner"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains(&format!("config_file = {}", path_str)));
    assert!(stderr.contains("vmware.host_ip = vc01.example.org"));
}

#[test]
fn default_config_location_is_used_without_flag() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) = run_vmwaretool(home.path(), &[]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains(".config/vmwaretool/vmwaretool.conf"));
    assert!(stderr.contains("using defaults"));
    assert!(stderr.contains("vmware.host_port = 443"));
}

#[test]
fn password_never_reaches_the_logs() {
    let (dir, path) = temp_config("[vmware]\nhost_password = \"hunter2\"\n");
    let (stdout, stderr, exit_code) = run_vmwaretool(dir.path(), &["-c", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stderr.contains("vmware.host_password = ****"));
    assert!(!stderr.contains("hunter2"));
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn loglevel_is_case_insensitive() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_vmwaretool(home.path(), &["--loglevel", "info"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stderr.contains("vmware.volume_folder = Volumes"));
    assert!(!stderr.contains("command line options"));
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn unknown_loglevel_exits_2() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_vmwaretool(home.path(), &["--loglevel", "TRACE"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("CRITICAL"));
}

#[test]
fn missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.conf");
    let (_stdout, stderr, exit_code) =
        run_vmwaretool(home.path(), &["-c", missing.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Config file not found"));
    assert!(stderr.contains("absent.conf"));
}

#[test]
fn unknown_spinner_style_fails_fast() {
    let (dir, path) = temp_config("[spinner]\nstyles = [\"dots\", \"sparkles\"]\n");
    let (_stdout, stderr, exit_code) =
        run_vmwaretool(dir.path(), &["-c", path.to_str().unwrap(), "--disable-spinner"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("sparkles"));
}

#[test]
fn malformed_config_names_the_file() {
    let (dir, path) = temp_config("[vmware\nhost_ip = ");
    let (_stdout, stderr, exit_code) = run_vmwaretool(dir.path(), &["-c", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("vmwaretool.conf"));
}
