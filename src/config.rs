//! Configuration file handling
//!
//! Settings live in `~/.config/fmuviz/config.toml` (or the path in
//! `FMUVIZ_CONFIG`). Every section has defaults, so a missing file or a
//! partial file is always valid. `migrate_config` adds fields introduced
//! by newer versions while keeping the user's comments and layout.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};

use crate::player::state::PlaybackSpeed;
use crate::scene::PositionMapping;
use crate::simulation::{HttpBackend, Parameter, Parameters};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FMUVIZ_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub playback: PlaybackConfig,
    pub scene: SceneConfig,
    pub chart: ChartConfig,
    pub parameters: Vec<Parameter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            playback: PlaybackConfig::default(),
            scene: SceneConfig::default(),
            chart: ChartConfig::default(),
            parameters: Parameters::mass_spring_defaults(),
        }
    }
}

/// Where and how to reach the simulation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Simulation endpoint
    pub url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Largest accepted response body in megabytes
    pub max_response_mb: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5001/api/simulate".to_string(),
            timeout_secs: 120,
            max_response_mb: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial speed multiplier
    pub speed: f64,
    /// Seconds moved by the arrow keys
    pub seek_step: f64,
    /// Frame interval while playing, in milliseconds
    pub frame_ms: u64,
    /// Start playing as soon as a result is loaded
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            seek_step: 0.5,
            frame_ms: 16,
            autoplay: false,
        }
    }
}

/// Which result columns drive the mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Index of the object whose trajectory is animated
    pub object_index: usize,
    pub position_x: String,
    pub position_y: String,
    pub position_z: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mapping = PositionMapping::default();
        Self {
            object_index: 0,
            position_x: mapping.x,
            position_y: mapping.y,
            position_z: mapping.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// How many variables are charted after each new result
    pub default_variables: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_variables: 2,
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("fmuviz").join("config.toml"))
    }

    /// Directory for the log file.
    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_local_dir().context("Could not determine data directory")?;
        Ok(dir.join("fmuviz"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn position_mapping(&self) -> PositionMapping {
        PositionMapping {
            x: self.scene.position_x.clone(),
            y: self.scene.position_y.clone(),
            z: self.scene.position_z.clone(),
        }
    }

    pub fn initial_parameters(&self) -> Parameters {
        Parameters::new(self.parameters.clone())
    }

    pub fn initial_speed(&self) -> PlaybackSpeed {
        PlaybackSpeed::new(self.playback.speed)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.playback.frame_ms.max(1))
    }

    /// HTTP backend configured from the `[backend]` section.
    pub fn http_backend(&self, url_override: Option<&str>) -> HttpBackend {
        let url = url_override.unwrap_or(&self.backend.url);
        HttpBackend::new(
            url,
            Duration::from_secs(self.backend.timeout_secs.max(1)),
            self.backend.max_response_mb.max(1) * 1024 * 1024,
        )
    }
}

/// Outcome of `migrate_config`.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateResult {
    /// The migrated file content
    pub content: String,
    /// Fields that were added, as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist at all
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty() || !self.sections_added.is_empty()
    }
}

/// Add fields missing from `content` using the current defaults.
///
/// Existing values, comments and ordering are preserved. Parameter lists
/// are only added when absent; an existing list is the user's choice.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Config is not valid TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Default config is not valid TOML")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        match default_item {
            Item::Table(default_table) => {
                if !doc.contains_key(section) {
                    doc.insert(section, default_item.clone());
                    sections_added.push(section.to_string());
                    added_fields.extend(
                        default_table
                            .iter()
                            .map(|(key, _)| format!("{}.{}", section, key)),
                    );
                } else if let Some(table) = doc[section].as_table_mut() {
                    for (key, value) in default_table.iter() {
                        if !table.contains_key(key) {
                            table.insert(key, value.clone());
                            added_fields.push(format!("{}.{}", section, key));
                        }
                    }
                }
            }
            Item::ArrayOfTables(_) => {
                if !doc.contains_key(section) {
                    doc.insert(section, default_item.clone());
                    sections_added.push(section.to_string());
                    added_fields.push(format!("{}.name", section));
                }
            }
            _ => {
                if !doc.contains_key(section) {
                    doc.insert(section, default_item.clone());
                    added_fields.push(section.to_string());
                }
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
