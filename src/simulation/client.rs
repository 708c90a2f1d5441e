//! Simulation backend client.
//!
//! The simulation itself runs in an external service. A request carries
//! the model file and a JSON object of parameter values as
//! `multipart/form-data`; the reply is either a `SimulationResult` or a
//! non-success status with an `{ "error": "..." }` body.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use serde::Deserialize;

use super::error::SimulationError;
use super::multipart::MultipartForm;
use crate::trajectory::SimulationResult;

/// Form field carrying the model file.
pub const MODEL_FIELD: &str = "fmuFile";
/// Form field carrying the JSON parameter object.
pub const PARAMETERS_FIELD: &str = "parameters";

/// A model file loaded into memory.
///
/// The bytes are shared so the file can be re-sent for every
/// re-simulation without reading it from disk again.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub name: String,
    pub bytes: Arc<Vec<u8>>,
}

impl ModelFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Read a model file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read model {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model.fmu".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Human readable size, e.g. "1.20 MB".
    pub fn size_display(&self) -> String {
        format_size(self.bytes.len(), DECIMAL)
    }
}

/// Everything needed for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub model: ModelFile,
    pub parameters: serde_json::Value,
}

impl SimulationRequest {
    /// Encode as the multipart form the backend expects.
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .file(MODEL_FIELD, &self.model.name, &self.model.bytes)
            .text(PARAMETERS_FIELD, &self.parameters.to_string())
    }
}

/// Something that can run a simulation.
///
/// The HTTP backend is the production implementation; tests substitute
/// their own.
pub trait SimulationBackend: Send {
    /// Human-readable target for log and status messages.
    fn describe(&self) -> String;

    /// Run one simulation, blocking until it completes.
    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, SimulationError>;
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turn a raw backend reply into a result.
pub fn interpret_response(status: u16, body: &str) -> Result<SimulationResult, SimulationError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { error: Some(msg) }) if !msg.trim().is_empty() => msg,
            Ok(_) => "backend reported an error".to_string(),
            Err(_) => "backend returned a non-JSON error".to_string(),
        };
        return Err(SimulationError::Upstream { status, message });
    }

    serde_json::from_str::<SimulationResult>(body)
        .map_err(|e| SimulationError::Malformed(e.to_string()))
}

/// Backend reached over HTTP.
pub struct HttpBackend {
    url: String,
    agent: ureq::Agent,
    max_response_bytes: u64,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>, timeout: Duration, max_response_bytes: u64) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Error bodies carry the message we want to show
            .http_status_as_error(false)
            .build();
        Self {
            url: url.into(),
            agent: ureq::Agent::new_with_config(config),
            max_response_bytes,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SimulationBackend for HttpBackend {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, SimulationError> {
        let form = request.to_form();
        let content_type = form.content_type();
        let body = form.finish();

        tracing::info!(
            url = %self.url,
            model = %request.model.name,
            bytes = request.model.len(),
            parameters = %request.parameters,
            "sending simulation request"
        );

        let mut response = self
            .agent
            .post(&self.url)
            .header("Content-Type", content_type)
            .send(&body[..])
            .map_err(|e| SimulationError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .with_config()
            .limit(self.max_response_bytes)
            .read_to_string()
            .map_err(|e| SimulationError::Transport(e.to_string()))?;

        tracing::info!(status, bytes = text.len(), "simulation response received");

        let result = interpret_response(status, &text);
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "simulation request failed");
        }
        result
    }
}
