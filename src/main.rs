//! fmuviz command line entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use fmuviz::cli::{Cli, Commands, ConfigCommands};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            model,
            result,
            backend,
        } => commands::view::handle(model, result, backend),
        Commands::Simulate {
            model,
            output,
            backend,
        } => commands::simulate::handle(&model, output.as_deref(), &backend),
        Commands::Sample {
            file,
            time,
            object,
            history,
        } => commands::sample::handle(&file, time, object, history),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate => commands::config::handle_migrate(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
