//! # Configuration
//!
//! Centralizes the few tunable settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.ticklist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover the options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::persist::default_autosave_path;
use crate::core::store::DEFAULT_MAX_ITEMS;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TicklistConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub max_items: Option<usize>,
    pub autosave_file: Option<String>,
}

/// Concrete values after collapsing the override chain.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub max_items: usize,
    pub autosave_path: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the path to `~/.ticklist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ticklist").join("config.toml"))
}

/// Load config from `~/.ticklist/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and returns
/// `TicklistConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<TicklistConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TicklistConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TicklistConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TicklistConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Ticklist Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [general]
# max_items = 100                  # Capacity of the checklist
# autosave_file = "/tmp/list.txt"  # Where unbound sessions are stashed on exit
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &TicklistConfig) -> ResolvedConfig {
    // Capacity: env → config → default
    let max_items = std::env::var("TICKLIST_MAX_ITEMS")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.general.max_items)
        .unwrap_or(DEFAULT_MAX_ITEMS);

    // Autosave location: env → config → ~/.tmplist.txt
    let autosave_path = std::env::var("TICKLIST_AUTOSAVE_FILE")
        .ok()
        .or_else(|| config.general.autosave_file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(default_autosave_path);

    ResolvedConfig {
        max_items,
        autosave_path,
    }
}
