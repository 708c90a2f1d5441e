//! Per-tick pipeline: elapsed time, clock advance, scene frame.

use std::time::Instant;

use super::clock;
use crate::player::state::{PlaybackSpeed, PlaybackState};
use crate::scene::{PositionMapping, SceneFrame};
use crate::trajectory::{sample_at, TimeRange, TimeSeries};

/// Measures wall-clock time between frames while playback runs.
///
/// The handle is dropped whenever playback stops, so the first tick after
/// resuming advances by zero instead of by the whole pause.
#[derive(Debug, Default)]
pub struct Ticker {
    last: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, or zero when not playing.
    pub fn elapsed(&mut self, now: Instant, playing: bool) -> f64 {
        if !playing {
            self.last = None;
            return 0.0;
        }
        let delta = self
            .last
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        delta
    }

    /// Whether a tick is scheduled.
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn stop(&mut self) {
        self.last = None;
    }
}

/// Advance the clock by `wall_seconds` scaled by `speed`.
pub fn step(
    state: PlaybackState,
    wall_seconds: f64,
    speed: PlaybackSpeed,
    range: TimeRange,
) -> PlaybackState {
    clock::advance(state, speed.scale(wall_seconds), range)
}

/// Scene for `time`, falling back to `previous` where data is missing.
pub fn frame_at(
    previous: &SceneFrame,
    series: Option<&TimeSeries>,
    time: f64,
    mapping: &PositionMapping,
) -> SceneFrame {
    let sample = series.and_then(|s| sample_at(s, time));
    SceneFrame::build(previous, sample, mapping)
}
