//! `fmuviz view`: the interactive viewer.

use std::path::PathBuf;

use anyhow::Result;

use fmuviz::cli::BackendArgs;
use fmuviz::player::{run_viewer, ViewerExit};
use fmuviz::session::Session;
use fmuviz::simulation::{ModelFile, SimulationWorker};
use fmuviz::trajectory::SimulationResult;
use fmuviz::Config;

use super::apply_overrides;

#[cfg(not(tarpaulin_include))]
pub fn handle(model: Option<PathBuf>, result: Option<PathBuf>, args: BackendArgs) -> Result<()> {
    let config = Config::load()?;
    let log_path = fmuviz::logging::init_file(&Config::data_dir()?)?;

    let model = model.map(|path| ModelFile::load(&path)).transpose()?;
    let saved = result.map(|path| SimulationResult::load(&path)).transpose()?;

    let mut session = Session::new(&config, model);
    apply_overrides(&mut session.parameters, &args.overrides)?;
    let mut worker = SimulationWorker::spawn(Box::new(config.http_backend(args.backend.as_deref())));

    match saved {
        Some(result) => session.load_result(result),
        None => {
            // Failures show in the status bar; the viewer still opens
            let _ = session.begin_simulation(&mut worker);
        }
    }

    let exit = run_viewer(&mut session, &mut worker, config.frame_interval())?;
    if exit == ViewerExit::Signal {
        eprintln!("Viewer terminated by signal. Log: {}", log_path.display());
    }
    Ok(())
}
