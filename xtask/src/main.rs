//! Development tasks for fmuviz
//!
//! `cargo xtask man [--out DIR]` writes man pages for the CLI and every
//! subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn write_page(cmd: &clap::Command, name: &str, out: &Path) -> Result<()> {
    let path = out.join(format!("{}.1", name));
    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  {}", path.display());
    Ok(())
}

fn generate_man(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let cmd = fmuviz::cli::Cli::command();
    write_page(&cmd, "fmuviz", out)?;
    for sub in cmd.get_subcommands() {
        let name = format!("fmuviz-{}", sub.get_name());
        write_page(sub, &name, out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => {
            println!("Generating man pages in {}", out.display());
            generate_man(&out)
        }
    }
}
