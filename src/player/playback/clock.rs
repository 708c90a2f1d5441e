//! Playback clock.
//!
//! Pure functions over `PlaybackState`. The frame loop calls `advance`
//! once per tick; key and mouse handlers use the manual controls.

use crate::player::state::PlaybackState;
use crate::trajectory::TimeRange;

/// Move the clock forward by `delta_seconds` of playback time.
///
/// Does nothing while paused or for a non-positive delta. Reaching the
/// end of `range` pins the time to `range.max()` and stops playback.
pub fn advance(state: PlaybackState, delta_seconds: f64, range: TimeRange) -> PlaybackState {
    // `!(x > 0)` also rejects NaN
    if !state.is_playing || !(delta_seconds > 0.0) {
        return state;
    }

    let next_time = state.current_time + delta_seconds;
    if next_time >= range.max() {
        PlaybackState::new(range.max(), false)
    } else {
        PlaybackState::new(next_time, true)
    }
}

/// Flip between playing and paused.
///
/// Unlike a plain flag flip, starting playback from the end of the range
/// rewinds to the start first, so a playing clock is never parked at the end.
pub fn toggle(state: PlaybackState, range: TimeRange) -> PlaybackState {
    if state.is_playing {
        return PlaybackState::new(state.current_time, false);
    }
    let current_time = if state.current_time >= range.max() {
        range.min()
    } else {
        state.current_time
    };
    // A zero-length range has nothing to play
    PlaybackState::new(current_time, current_time < range.max())
}

/// Stop and rewind to time zero, clamped into `range`.
///
/// This is the state a freshly loaded trajectory starts from.
pub fn reset(range: TimeRange) -> PlaybackState {
    PlaybackState::new(range.clamp(0.0), false)
}

/// Jump to `time`, clamped into `range`. The play flag is kept.
pub fn seek(state: PlaybackState, time: f64, range: TimeRange) -> PlaybackState {
    let current_time = range.clamp(time);
    let is_playing = state.is_playing && current_time < range.max();
    PlaybackState::new(current_time, is_playing)
}

/// Move by `offset` seconds relative to the current time.
pub fn seek_by(state: PlaybackState, offset: f64, range: TimeRange) -> PlaybackState {
    seek(state, state.current_time + offset, range)
}

/// Jump to a fraction (0.0..=1.0) of the range.
pub fn seek_to_fraction(state: PlaybackState, fraction: f64, range: TimeRange) -> PlaybackState {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    seek(state, range.min() + fraction * range.duration(), range)
}

pub fn jump_to_start(state: PlaybackState, range: TimeRange) -> PlaybackState {
    seek(state, range.min(), range)
}

pub fn jump_to_end(state: PlaybackState, range: TimeRange) -> PlaybackState {
    seek(state, range.max(), range)
}
