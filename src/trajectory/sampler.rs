//! Sample lookup for playback.
//!
//! The playback view needs two things from a trajectory at time `t`:
//! the single "current" sample that drives positions, and the history
//! so far that feeds the chart. Both are computed from the same `t`.

use super::{Sample, TimeSeries};

/// Return the first sample whose time is at or after `query_time`.
///
/// Falls back to the last sample when `query_time` is past the end.
/// This is a ceiling lookup: no interpolation happens between samples.
/// Returns `None` only for an empty series; callers are expected to
/// handle the "no data yet" case before getting here.
pub fn sample_at(series: &TimeSeries, query_time: f64) -> Option<&Sample> {
    let samples = series.samples();
    // Times are non-decreasing, so the predicate is monotonic
    let idx = samples.partition_point(|s| s.time < query_time);
    samples.get(idx).or_else(|| samples.last())
}

/// Samples with `time <= current_time`, in order.
pub fn history_until(series: &TimeSeries, current_time: f64) -> &[Sample] {
    let samples = series.samples();
    let end = samples.partition_point(|s| s.time <= current_time);
    &samples[..end]
}

/// Minimum and maximum of a variable over the whole series.
///
/// Used to keep chart axes stable while playback reveals more data.
pub fn value_bounds(series: &TimeSeries, variable: &str) -> Option<(f64, f64)> {
    series
        .samples()
        .iter()
        .filter_map(|s| s.get(variable))
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
