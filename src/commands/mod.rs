//! Command handlers for the fmuviz binary.

pub mod completions;
pub mod config;
pub mod sample;
pub mod simulate;
pub mod view;

use anyhow::{bail, Result};

use fmuviz::simulation::params::parse_override;
use fmuviz::simulation::Parameters;

/// Apply `--set NAME=VALUE` overrides.
pub fn apply_overrides(parameters: &mut Parameters, overrides: &[String]) -> Result<()> {
    for raw in overrides {
        let (name, value) = parse_override(raw).map_err(anyhow::Error::msg)?;
        if !parameters.set(&name, value) {
            let known: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
            bail!("Unknown parameter '{}' (known: {})", name, known.join(", "));
        }
    }
    Ok(())
}
