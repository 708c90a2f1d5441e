//! fmuviz - terminal 3D visualizer for mass-spring-damper FMU simulations
//!
//! The library holds everything except the command handlers:
//! trajectory data and sampling, the playback clock, scene geometry, the
//! simulation backend client, the viewer session and its terminal UI.

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod scene;
pub mod session;
pub mod simulation;
pub mod trajectory;
pub mod tui;

pub use config::Config;
pub use session::Session;
pub use trajectory::{Sample, SimulationResult, TimeRange, TimeSeries};
