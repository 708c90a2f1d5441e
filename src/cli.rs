//! CLI definitions for fmuviz
//!
//! Shared between the main binary and xtask (for man page generation).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Version string with the git commit for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("FMUVIZ_BUILD_DATE"),
    ")"
);

/// Clean version string for official builds.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FMUVIZ_BUILD_DATE"), ")");

/// Terminal 3D visualizer for mass-spring-damper FMU simulations
#[derive(Parser, Debug)]
#[command(name = "fmuviz")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m
  fmuviz view model.fmu                  Simulate and open the viewer
  fmuviz view --result run.json          Replay a saved result
  fmuviz simulate model.fmu -o run.json  Run once and save the result
  fmuviz sample run.json --time 1.5      Print the sample shown at t=1.5

Configuration: ~/.config/fmuviz/config.toml (override with FMUVIZ_CONFIG)
Log filter: FMUVIZ_LOG (default fmuviz=info)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that talk to the backend.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Simulation endpoint (overrides [backend].url)
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Parameter override, repeatable (e.g. --set mass=2.5)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive viewer
    #[command(long_about = "Open the interactive viewer.

With a model file, the model is simulated once on start and can be
re-simulated with edited parameters (key S). With --result, a saved
result is replayed and re-simulation is disabled.

EXAMPLES:
    fmuviz view model.fmu
    fmuviz view model.fmu --set stiffness=250
    fmuviz view --result run.json")]
    View {
        /// Model file (.fmu) to simulate
        #[arg(value_name = "MODEL", required_unless_present = "result")]
        model: Option<PathBuf>,

        /// Saved result JSON to show instead of simulating
        #[arg(long, value_name = "FILE", conflicts_with = "model")]
        result: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Simulate once and write the result JSON
    #[command(long_about = "Send the model and parameters to the backend once and
write the result JSON to a file or stdout. A summary goes to stderr.

EXAMPLES:
    fmuviz simulate model.fmu -o run.json
    fmuviz simulate model.fmu --set mass=2 --backend http://sim:5001/api/simulate")]
    Simulate {
        /// Model file (.fmu) to simulate
        #[arg(value_name = "MODEL")]
        model: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Print the sample displayed at a given time
    #[command(long_about = "Print the sample the viewer would display at TIME: the
first sample whose time is at or after TIME, or the last sample when TIME
is past the end.

EXAMPLES:
    fmuviz sample run.json --time 1.5
    fmuviz sample run.json --time 1.5 --history")]
    Sample {
        /// Saved result JSON
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Query time in seconds
        #[arg(short, long, value_name = "SECONDS", allow_negative_numbers = true)]
        time: f64,

        /// Object index within the result
        #[arg(long, default_value_t = 0)]
        object: usize,

        /// Print every sample up to TIME instead
        #[arg(long)]
        history: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Open configuration in $EDITOR
    Edit,
    /// Add fields introduced by newer versions
    Migrate,
}
