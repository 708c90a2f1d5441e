//! Simulation backend access.
//!
//! The simulation runs in an external process; this module only knows
//! how to ask for a run and how to read the answer:
//!
//! - [`params`] - tunable model parameters sent with each run
//! - [`client`] - the `SimulationBackend` trait and its HTTP implementation
//! - [`worker`] - background thread so the viewer never blocks on the network
//! - [`error`] - failure taxonomy shown to the user

pub mod client;
mod error;
mod multipart;
pub mod params;
mod worker;

pub use client::{HttpBackend, ModelFile, SimulationBackend, SimulationRequest};
pub use error::SimulationError;
pub use multipart::MultipartForm;
pub use params::{Parameter, Parameters};
pub use worker::{SimulationOutcome, SimulationWorker};
