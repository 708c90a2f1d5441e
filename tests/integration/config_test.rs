//! Integration tests for `fmuviz config`

use std::fs;

use tempfile::TempDir;

use crate::helpers::run_fmuviz;

#[test]
fn show_prints_defaults_when_no_file_exists() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fmuviz(dir.path(), &["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("config.toml"));
    assert!(stdout.contains("[backend]"));
    assert!(stdout.contains("http://127.0.0.1:5001/api/simulate"));
    assert!(stdout.contains("[playback]"));
}

#[test]
fn show_reflects_file_values() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[backend]\nurl = \"http://sim.local:8080/api/simulate\"\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run_fmuviz(dir.path(), &["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("http://sim.local:8080/api/simulate"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[backend\nurl = 1").unwrap();

    let (_stdout, stderr, exit_code) = run_fmuviz(dir.path(), &["config", "show"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse config"));
}

#[test]
fn migrate_without_terminal_makes_no_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[backend]\ntimeout_secs = 30\n").unwrap();

    let (stdout, _stderr, exit_code) = run_fmuviz(dir.path(), &["config", "migrate"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("backend.url"));
    assert!(stdout.contains("No changes made"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[backend]\ntimeout_secs = 30\n"
    );
}
