//! Library-level tests for the HTTP backend and the background worker

use std::time::Duration;

use fmuviz::simulation::{
    HttpBackend, ModelFile, SimulationBackend, SimulationError, SimulationRequest, SimulationWorker,
};

use crate::helpers::{serve_once, OK_RESPONSE};

fn request() -> SimulationRequest {
    SimulationRequest {
        model: ModelFile::new("msd.fmu", b"PK\x03\x04".to_vec()),
        parameters: serde_json::json!({"mass": 1.0, "stiffness": 250.0}),
    }
}

#[test]
fn http_backend_posts_multipart_form() {
    let (url, server) = serve_once(200, OK_RESPONSE);
    let backend = HttpBackend::new(url, Duration::from_secs(10), 1024 * 1024);

    let result = backend.simulate(&request()).unwrap();
    assert_eq!(result.sample_count(), 3);

    let captured = server.join().unwrap();
    assert!(captured
        .head
        .to_ascii_lowercase()
        .contains("content-type: multipart/form-data; boundary="));
    assert!(captured.body_text().contains("name=\"parameters\""));
    assert!(captured.body_text().contains("\"stiffness\":250.0"));
}

#[test]
fn http_backend_surfaces_upstream_error() {
    let (url, server) = serve_once(400, r#"{"error": "Missing fmuFile"}"#);
    let backend = HttpBackend::new(url, Duration::from_secs(10), 1024 * 1024);

    let err = backend.simulate(&request()).unwrap_err();
    server.join().unwrap();
    assert_eq!(
        err,
        SimulationError::Upstream {
            status: 400,
            message: "Missing fmuFile".to_string()
        }
    );
}

#[test]
fn oversized_response_is_a_transport_error() {
    let (url, server) = serve_once(200, OK_RESPONSE);
    let backend = HttpBackend::new(url, Duration::from_secs(10), 16);

    let err = backend.simulate(&request()).unwrap_err();
    // The client may hang up mid-response
    let _ = server.join();
    assert!(matches!(err, SimulationError::Transport(_)));
}

#[test]
fn worker_delivers_outcome_from_http_backend() {
    let (url, server) = serve_once(200, OK_RESPONSE);
    let mut worker = SimulationWorker::spawn(Box::new(HttpBackend::new(
        url,
        Duration::from_secs(10),
        1024 * 1024,
    )));

    let id = worker.submit(request()).unwrap();
    let outcome = worker.wait(Duration::from_secs(10)).expect("no outcome");
    server.join().unwrap();

    assert_eq!(outcome.id, id);
    assert_eq!(outcome.result.unwrap().time_range.max(), 2.0);
}
