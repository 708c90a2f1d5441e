//! Config subcommands handler

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use fmuviz::config::{migrate_config, MigrateResult};
use fmuviz::tui::current_theme;
use fmuviz::tui::theme::ansi;
use fmuviz::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let theme = current_theme();
    println!(
        "{}",
        theme.secondary_text(&format!("# {}", Config::config_path()?.display()))
    );
    println!("{}", theme.primary_text(&toml::to_string_pretty(&config)?));
    Ok(())
}

/// Open the configuration file in $EDITOR (defaults to `vi`).
///
/// A default file is written first if none exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let path = Config::config_path()?;
    if !path.exists() {
        Config::default().save()?;
    }
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        current_theme().primary_text(&format!("Opening {} with {}", path.display(), editor))
    );

    let status = std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to start editor '{}'", editor))?;
    if !status.success() {
        anyhow::bail!("Editor exited with {}", status);
    }

    // Catch typos before the next run does
    Config::load_from(&path)?;
    Ok(())
}

/// Add missing fields to the config file after a confirmation prompt.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate() -> Result<()> {
    let theme = current_theme();
    let path = Config::config_path()?;
    let exists = path.exists();
    let content = if exists {
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    if exists {
        println!(
            "{}",
            theme.primary_text(&format!(
                "Found {} missing field(s), {} new section(s):",
                result.added_fields.len(),
                result.sections_added.len()
            ))
        );
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create it with default settings.")
        );
    }
    println!();
    for line in preview_lines(&result) {
        println!("{}+ {}{}", ansi::GREEN, line, ansi::RESET);
    }
    println!();

    let question = if exists {
        format!("Apply these changes to {}?", path.display())
    } else {
        format!("Create {}?", path.display())
    };
    if !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", theme.success_text("Config updated."));
    Ok(())
}

/// One line per added field, `section.key = value`, plus whole new sections.
fn preview_lines(result: &MigrateResult) -> Vec<String> {
    let Ok(doc) = result.content.parse::<toml_edit::DocumentMut>() else {
        return result.added_fields.clone();
    };

    let mut lines: Vec<String> = result
        .sections_added
        .iter()
        .map(|section| format!("[{}]", section))
        .collect();

    for field in &result.added_fields {
        let Some((section, key)) = field.split_once('.') else {
            lines.push(field.clone());
            continue;
        };
        if result.sections_added.iter().any(|s| s == section) {
            continue;
        }
        let value = doc
            .get(section)
            .and_then(|item| item.get(key))
            .and_then(|item| item.as_value())
            .map(|v| v.to_string().trim().to_string())
            .unwrap_or_default();
        lines.push(format!("{} = {}", field, value));
    }
    lines
}

/// Ask a yes/no question. Non-interactive stdin answers no.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: run `fmuviz config migrate` in a terminal to apply")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
