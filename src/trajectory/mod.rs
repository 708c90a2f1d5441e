//! Simulation result model
//!
//! Types for the trajectory data returned by the simulation backend:
//!
//! - `Sample`: one time-stamped record of named variable values
//! - `TimeSeries`: samples ordered by non-decreasing time
//! - `TimeRange`: the playback bounds of a run
//! - `SimulationResult`: the full backend response (range, variables, objects)
//!
//! Results are produced once per simulation run and replaced wholesale;
//! nothing in here is mutated after validation.

mod sampler;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

pub use sampler::{history_until, sample_at, value_bounds};

/// Name of the time column every sample carries.
pub const TIME_VARIABLE: &str = "time";

/// Errors raised while validating a simulation result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrajectoryError {
    #[error("sample {index} goes back in time ({time} < {previous})")]
    NonMonotonic {
        index: usize,
        previous: f64,
        time: f64,
    },

    #[error("invalid time range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

/// One time-stamped record of variable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    #[serde(flatten, deserialize_with = "numeric_values")]
    pub values: BTreeMap<String, f64>,
}

impl Sample {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Look up a variable by name. `time` resolves to the sample time.
    pub fn get(&self, name: &str) -> Option<f64> {
        if name == TIME_VARIABLE {
            return Some(self.time);
        }
        self.values.get(name).copied()
    }
}

/// Keep numeric columns only. Booleans map to 0/1, anything else is dropped.
fn numeric_values<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| {
            let number = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
                _ => None,
            };
            number.map(|n| (name, n))
        })
        .collect())
}

/// Samples ordered by non-decreasing time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series, rejecting samples that go back in time.
    pub fn new(samples: Vec<Sample>) -> std::result::Result<Self, TrajectoryError> {
        for (index, pair) in samples.windows(2).enumerate() {
            // NaN times fail this comparison too
            if !(pair[1].time >= pair[0].time) {
                return Err(TrajectoryError::NonMonotonic {
                    index: index + 1,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let samples = Vec::<Sample>::deserialize(deserializer)?;
        TimeSeries::new(samples).map_err(serde::de::Error::custom)
    }
}

/// Valid playback bounds, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    min: f64,
    max: f64,
}

impl TimeRange {
    pub fn new(min: f64, max: f64) -> std::result::Result<Self, TrajectoryError> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(TrajectoryError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn duration(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a time into `[min, max]`.
    pub fn clamp(&self, time: f64) -> f64 {
        if time.is_nan() {
            return self.min;
        }
        time.clamp(self.min, self.max)
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }
}

impl Serialize for TimeRange {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.min, self.max].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [min, max] = <[f64; 2]>::deserialize(deserializer)?;
        TimeRange::new(min, max).map_err(serde::de::Error::custom)
    }
}

/// One simulated object and its trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: TimeSeries,
}

/// Complete backend response for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub time_range: TimeRange,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub objects: Vec<SimObject>,
}

impl SimulationResult {
    /// Parse a backend response body.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid simulation result")
    }

    /// Load a result previously saved with `fmuviz simulate -o`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the result as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Trajectory of the object at `index`, if it has any samples.
    pub fn series(&self, index: usize) -> Option<&TimeSeries> {
        self.objects
            .get(index)
            .map(|o| &o.data)
            .filter(|s| !s.is_empty())
    }

    /// Variables that can be charted (everything except `time`).
    pub fn chartable_variables(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .map(String::as_str)
            .filter(|v| *v != TIME_VARIABLE)
    }

    /// Total number of samples across all objects.
    pub fn sample_count(&self) -> usize {
        self.objects.iter().map(|o| o.data.len()).sum()
    }
}
