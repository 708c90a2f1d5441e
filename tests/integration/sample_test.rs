//! Integration tests for `fmuviz sample`

use tempfile::TempDir;

use crate::helpers::{fixtures_dir, run_fmuviz, temp_fixture};

fn fixture() -> String {
    fixtures_dir().join("result.json").display().to_string()
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("sample output should be JSON")
}

#[test]
fn time_between_samples_shows_the_next_sample() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_fmuviz(dir.path(), &["sample", &fixture(), "--time", "1.5"]);

    assert_eq!(exit_code, 0);
    let sample = parse(&stdout);
    assert_eq!(sample["time"], 2.0);
    assert_eq!(sample["body1.r_0[2]"], -0.4);
}

#[test]
fn exact_time_shows_that_sample() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, _) = run_fmuviz(dir.path(), &["sample", &fixture(), "-t", "1"]);
    assert_eq!(parse(&stdout)["spring.f"], 40.0);
}

#[test]
fn times_outside_the_range_clamp_to_the_ends() {
    let dir = TempDir::new().unwrap();

    let (stdout, _stderr, _) = run_fmuviz(dir.path(), &["sample", &fixture(), "--time", "-4"]);
    assert_eq!(parse(&stdout)["time"], 0.0);

    let (stdout, _stderr, _) = run_fmuviz(dir.path(), &["sample", &fixture(), "--time", "99"]);
    assert_eq!(parse(&stdout)["time"], 3.0);
}

#[test]
fn history_lists_samples_up_to_time() {
    let dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_fmuviz(dir.path(), &["sample", &fixture(), "--time", "2", "--history"]);

    assert_eq!(exit_code, 0);
    let history = parse(&stdout);
    let times: Vec<f64> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["time"].as_f64().unwrap())
        .collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
}

#[test]
fn missing_object_is_an_error() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) =
        run_fmuviz(dir.path(), &["sample", &fixture(), "--time", "1", "--object", "3"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Object 3 has no samples"));
}

#[test]
fn corrupt_result_file_is_reported() {
    let (dir, path) = temp_fixture("result.json");
    std::fs::write(&path, "{\"timeRange\": [2, 1]}").unwrap();

    let (_stdout, stderr, exit_code) =
        run_fmuviz(dir.path(), &["sample", path.to_str().unwrap(), "--time", "0"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse"));
}

#[test]
fn fixture_loads_through_the_library() {
    let result = fmuviz::SimulationResult::load(&fixtures_dir().join("result.json")).unwrap();
    assert_eq!(result.objects.len(), 1);
    assert_eq!(result.sample_count(), 4);
    let vars: Vec<_> = result.chartable_variables().collect();
    assert_eq!(vars.len(), 4);
    assert!(!vars.contains(&"time"));
}
