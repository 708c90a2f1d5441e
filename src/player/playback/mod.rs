//! Playback logic for the viewer.
//!
//! `clock` holds the pure state transitions, `ticker` turns wall-clock
//! time into clock advances and scene frames.

pub mod clock;
mod ticker;

pub use clock::{advance, jump_to_end, jump_to_start, reset, seek, seek_by, seek_to_fraction, toggle};
pub use ticker::{frame_at, step, Ticker};
