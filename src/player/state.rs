//! Player state types
//!
//! Contains the `PlaybackState` value driven by the playback clock,
//! the speed multiplier, and the control-flow signal returned by input
//! handlers.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the viewer
    Quit,
}

/// Scrub position and play/pause flag.
///
/// `current_time` stays inside the active time range, and `is_playing`
/// is only true while `current_time` is below the end of that range.
/// See `player::playback` for the operations that maintain this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Current playback time in seconds
    pub current_time: f64,
    /// Whether the clock advances on each tick
    pub is_playing: bool,
}

impl PlaybackState {
    /// Stopped at time zero.
    pub const INITIAL: Self = Self {
        current_time: 0.0,
        is_playing: false,
    };

    pub fn new(current_time: f64, is_playing: bool) -> Self {
        Self {
            current_time,
            is_playing,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Playback speed multiplier applied to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 3.0;

    /// Create a speed, clamped to `MIN..=MAX`.
    pub fn new(multiplier: f64) -> Self {
        if multiplier.is_nan() {
            return Self::default();
        }
        Self(multiplier.clamp(Self::MIN, Self::MAX))
    }

    pub fn multiplier(&self) -> f64 {
        self.0
    }

    /// Increase playback speed (max 3x).
    pub fn speed_up(&mut self) {
        self.0 = (self.0 * 1.5).min(Self::MAX);
    }

    /// Decrease playback speed (min 0.1x).
    pub fn speed_down(&mut self) {
        self.0 = (self.0 / 1.5).max(Self::MIN);
    }

    /// Scale an elapsed wall-clock interval.
    pub fn scale(&self, seconds: f64) -> f64 {
        seconds * self.0
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}
