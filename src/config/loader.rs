//! Configuration loading and discovery for `retheme.toml`
//!
//! Provides functions to find and load override configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::RethemeConfig;
use crate::models::ThemeEntry;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse retheme.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error (override files)
    #[error("Failed to parse theme overrides: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Find retheme.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for retheme.toml
/// 2. Check XDG_CONFIG_HOME/retheme/retheme.toml (or ~/.config/retheme/retheme.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find retheme.toml in the XDG config directory.
fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("retheme").join("retheme.toml");
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find retheme.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join("retheme.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a retheme.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. If no config file is found, returns the
/// default configuration (no overrides).
pub fn load_config(path: Option<&Path>) -> Result<RethemeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(RethemeConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RethemeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RethemeConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Load theme overrides from a JSON file: an array of `{name, exact,
/// present, absent}` objects, the format the original host stored its
/// overrides in.
pub fn load_overrides_json(path: &Path) -> Result<Vec<ThemeEntry>, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let entries: Vec<ThemeEntry> = serde_json::from_str(&contents)?;
    Ok(entries)
}
