//! `fmuviz sample`: inspect a saved result at a point in time.

use std::path::Path;

use anyhow::{Context, Result};

use fmuviz::trajectory::{history_until, sample_at, SimulationResult};

/// Print the sample shown at `time` (or the history up to it) as JSON.
pub fn handle(file: &Path, time: f64, object: usize, history: bool) -> Result<()> {
    fmuviz::logging::init_stderr();
    let result = SimulationResult::load(file)?;
    let series = result
        .series(object)
        .with_context(|| format!("Object {} has no samples in {}", object, file.display()))?;

    let json = if history {
        serde_json::to_string_pretty(history_until(series, time))?
    } else {
        // A non-empty series always has a sample to show
        let sample = sample_at(series, time).context("Series is empty")?;
        serde_json::to_string_pretty(sample)?
    };
    tracing::debug!(time, object, history, "sampled result");
    println!("{}", json);
    Ok(())
}
