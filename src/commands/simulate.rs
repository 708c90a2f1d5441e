//! `fmuviz simulate`: one blocking run against the backend.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use fmuviz::cli::BackendArgs;
use fmuviz::simulation::{ModelFile, SimulationBackend, SimulationRequest};
use fmuviz::tui::current_theme;
use fmuviz::Config;

use super::apply_overrides;

pub fn handle(model: &Path, output: Option<&Path>, args: &BackendArgs) -> Result<()> {
    fmuviz::logging::init_stderr();
    let config = Config::load()?;
    let theme = current_theme();

    let model = ModelFile::load(model)?;
    let mut parameters = config.initial_parameters();
    apply_overrides(&mut parameters, &args.overrides)?;

    let backend = config.http_backend(args.backend.as_deref());
    let request = SimulationRequest {
        model,
        parameters: parameters.to_json(),
    };

    eprintln!(
        "{}",
        theme.secondary_text(&format!(
            "Simulating {} ({}) on {}",
            request.model.name,
            request.model.size_display(),
            backend.describe()
        ))
    );
    let started = Instant::now();
    let result = backend
        .simulate(&request)
        .with_context(|| format!("Simulation of {} failed", request.model.name))?;

    match output {
        Some(path) => result.save(path)?,
        None => println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to encode result")?
        ),
    }

    eprintln!(
        "{}",
        theme.success_text(&format!(
            "Done in {:.2}s: {} object(s), {} sample(s), t = [{}, {}]",
            started.elapsed().as_secs_f64(),
            result.objects.len(),
            result.sample_count(),
            result.time_range.min(),
            result.time_range.max()
        ))
    );
    Ok(())
}
