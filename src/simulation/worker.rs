//! Background worker for simulation requests
//!
//! Runs requests on a dedicated thread so the frame loop keeps drawing
//! while the backend works. Results come back over a channel and are
//! polled once per frame.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::client::{SimulationBackend, SimulationRequest};
use super::error::SimulationError;
use crate::trajectory::SimulationResult;

/// A queued request tagged with its id.
struct Job {
    id: u64,
    request: SimulationRequest,
}

/// Result of a background simulation.
#[derive(Debug)]
pub struct SimulationOutcome {
    /// The id returned by `submit`
    pub id: u64,
    pub result: Result<SimulationResult, SimulationError>,
}

/// Worker loop that runs requests until the request channel closes.
fn worker_loop(
    request_rx: Receiver<Job>,
    result_tx: Sender<SimulationOutcome>,
    backend: Box<dyn SimulationBackend>,
) {
    while let Ok(job) = request_rx.recv() {
        tracing::debug!(id = job.id, "worker picked up simulation request");
        let result = backend.simulate(&job.request);
        // Ignore send errors (viewer may have exited)
        let _ = result_tx.send(SimulationOutcome { id: job.id, result });
    }
    tracing::debug!("simulation worker exiting");
}

/// Handle to the background simulation thread.
pub struct SimulationWorker {
    request_tx: Option<Sender<Job>>,
    result_rx: Receiver<SimulationOutcome>,
    handle: Option<JoinHandle<()>>,
    next_id: u64,
    backend: String,
}

impl SimulationWorker {
    /// Start a worker thread driving `backend`.
    pub fn spawn(backend: Box<dyn SimulationBackend>) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let description = backend.describe();

        let handle = thread::Builder::new()
            .name("simulation".to_string())
            .spawn(move || worker_loop(request_rx, result_tx, backend))
            .map_err(|e| tracing::error!(error = %e, "failed to spawn simulation worker"))
            .ok();

        Self {
            request_tx: handle.as_ref().map(|_| request_tx),
            result_rx,
            handle,
            next_id: 1,
            backend: description,
        }
    }

    /// Where requests go, for status messages.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Queue a request. Returns the id its outcome will carry.
    pub fn submit(&mut self, request: SimulationRequest) -> Result<u64, SimulationError> {
        let id = self.next_id;
        let tx = self
            .request_tx
            .as_ref()
            .ok_or_else(|| SimulationError::Transport("simulation worker is not running".into()))?;
        tx.send(Job { id, request })
            .map_err(|_| SimulationError::Transport("simulation worker stopped".into()))?;
        self.next_id += 1;
        Ok(id)
    }

    /// Non-blocking poll for a finished request.
    pub fn poll(&self) -> Option<SimulationOutcome> {
        match self.result_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocking wait with a timeout, for headless use.
    pub fn wait(&self, timeout: Duration) -> Option<SimulationOutcome> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for SimulationWorker {
    fn drop(&mut self) {
        // Closing the channel ends the loop once any in-flight request returns.
        // The thread is not joined so teardown never waits on the network.
        self.request_tx.take();
        self.handle.take();
    }
}
