//! Integration tests for `fmuviz simulate` against a local stand-in backend

use tempfile::TempDir;

use crate::helpers::{fixtures_dir, run_fmuviz, serve_once, OK_RESPONSE};

fn model() -> String {
    fixtures_dir().join("model.fmu").display().to_string()
}

#[test]
fn successful_run_writes_result_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("run.json");
    let (url, server) = serve_once(200, OK_RESPONSE);

    let (_stdout, stderr, exit_code) = run_fmuviz(
        dir.path(),
        &[
            "simulate",
            &model(),
            "-o",
            output.to_str().unwrap(),
            "--backend",
            &url,
            "--set",
            "mass=2.5",
        ],
    );
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stderr.contains("3 sample(s)"));

    let request = server.join().unwrap();
    assert!(request.head.starts_with("POST /api/simulate"));
    let body = request.body_text();
    assert!(body.contains("name=\"fmuFile\"; filename=\"model.fmu\""));
    assert!(body.contains("fake-fmu"));
    assert!(body.contains("{\"mass\":2.5,\"stiffness\":100.0}"));

    let saved = fmuviz::SimulationResult::load(&output).unwrap();
    assert_eq!(saved.time_range.max(), 2.0);
}

#[test]
fn result_goes_to_stdout_without_output_flag() {
    let dir = TempDir::new().unwrap();
    let (url, server) = serve_once(200, OK_RESPONSE);

    let (stdout, _stderr, exit_code) =
        run_fmuviz(dir.path(), &["simulate", &model(), "--backend", &url]);
    server.join().unwrap();

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["timeRange"], serde_json::json!([0.0, 2.0]));
}

#[test]
fn backend_error_message_is_shown() {
    let dir = TempDir::new().unwrap();
    let (url, server) = serve_once(500, r#"{"error": "FMU instantiation failed"}"#);

    let (_stdout, stderr, exit_code) =
        run_fmuviz(dir.path(), &["simulate", &model(), "--backend", &url]);
    server.join().unwrap();

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("FMU instantiation failed"));
}

#[test]
fn unreachable_backend_fails() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_fmuviz(
        dir.path(),
        &["simulate", &model(), "--backend", "http://127.0.0.1:9/api/simulate"],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("unreachable"));
}

#[test]
fn unknown_parameter_is_rejected_before_sending() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_fmuviz(
        dir.path(),
        &["simulate", &model(), "--set", "damping=3", "--backend", "http://127.0.0.1:9/"],
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Unknown parameter 'damping'"));
}

#[test]
fn missing_model_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.fmu");
    let (_stdout, _stderr, exit_code) =
        run_fmuviz(dir.path(), &["simulate", missing.to_str().unwrap()]);
    assert_eq!(exit_code, 1);
}
