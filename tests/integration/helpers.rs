//! Shared helpers for integration tests

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy a fixture into a fresh temp dir.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

/// Run the fmuviz binary with an isolated config file.
///
/// Returns (stdout, stderr, exit code).
pub fn run_fmuviz(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_fmuviz"))
        .args(args)
        .env("FMUVIZ_CONFIG", config_dir.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("FMUVIZ_LOG")
        .output()
        .expect("Failed to execute fmuviz");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

/// A request captured by [`serve_once`].
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Accept one HTTP request on a local port and answer it with `status`
/// and a JSON `body`.
///
/// Returns the endpoint URL and a handle yielding the captured request.
pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let url = format!(
        "http://{}/api/simulate",
        listener.local_addr().expect("No local addr")
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept");
        let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream"));

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("Failed to read header");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
            head.push_str(&line);
        }

        let mut request_body = vec![0u8; content_length];
        reader
            .read_exact(&mut request_body)
            .expect("Failed to read body");

        let mut stream = stream;
        let reason = if status == 200 { "OK" } else { "Error" };
        write!(
            stream,
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        )
        .expect("Failed to write response");
        stream.flush().expect("Failed to flush");

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    (url, handle)
}

pub const OK_RESPONSE: &str = r#"{"timeRange":[0,2],"variables":["time","body1.r_0[1]","body1.r_0[2]","body1.r_0[3]"],"objects":[{"id":"simulation_trajectory","type":"trajectory","data":[{"time":0,"body1.r_0[1]":0.3,"body1.r_0[2]":-0.2,"body1.r_0[3]":0},{"time":1,"body1.r_0[1]":0.3,"body1.r_0[2]":-0.7,"body1.r_0[3]":0},{"time":2,"body1.r_0[1]":0.3,"body1.r_0[2]":-0.5,"body1.r_0[3]":0}]}]}"#;
