//! Tracing setup.
//!
//! The viewer owns the terminal, so its log goes to `fmuviz.log` in the
//! data directory. Headless commands log to stderr instead. The filter
//! comes from `FMUVIZ_LOG` and defaults to `fmuviz=info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FMUVIZ_LOG";
const DEFAULT_FILTER: &str = "fmuviz=info";
const LOG_FILE: &str = "fmuviz.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr.
pub fn init_stderr() {
    // A second init (e.g. in tests) is harmless
    let _ = fmt()
        .with_env_filter(filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to `fmuviz.log` inside `dir`. Returns the log file path.
pub fn init_file(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}
