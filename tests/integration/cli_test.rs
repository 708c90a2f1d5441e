//! Integration tests for top-level CLI behavior

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fmuviz(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fmuviz").unwrap();
    cmd.env("FMUVIZ_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let mut assert = fmuviz(&dir).arg("--help").assert().success();
    for sub in ["view", "simulate", "sample", "config", "completions"] {
        assert = assert.stdout(predicate::str::contains(sub));
    }
    assert.stdout(predicate::str::contains("FMUVIZ_CONFIG"));
}

#[test]
fn version_starts_with_package_version() {
    let dir = TempDir::new().unwrap();
    fmuviz(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "fmuviz {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn view_without_model_or_result_is_usage_error() {
    let dir = TempDir::new().unwrap();
    fmuviz(&dir)
        .arg("view")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MODEL"));
}

#[test]
fn view_rejects_model_with_result() {
    let dir = TempDir::new().unwrap();
    fmuviz(&dir)
        .args(["view", "m.fmu", "--result", "r.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn completions_bash_mentions_binary() {
    let dir = TempDir::new().unwrap();
    fmuviz(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fmuviz").and(predicate::str::contains("simulate")));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    fmuviz(&dir).arg("record").assert().failure();
}
