//! Interactive viewer.
//!
//! The viewer is organized into submodules:
//! - `state`: PlaybackState, PlaybackSpeed and InputResult
//! - `playback/`: the playback clock and per-tick pipeline
//! - `input/`: keyboard and mouse handling
//! - `render/`: scene, panels, chart, progress bar, status bar and overlays
//! - `viewer`: the frame loop tying them together

pub(crate) mod input;
pub mod playback;
pub mod render;
pub mod state;
mod viewer;

pub use state::{InputResult, PlaybackSpeed, PlaybackState};
pub use viewer::{poll_timeout, run_viewer, ViewerExit};
