//! Configuration schema types for `retheme.toml`

use serde::{Deserialize, Serialize};

use crate::models::{Theme, ThemeEntry};

/// Complete retheme.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RethemeConfig {
    /// User-defined theme overrides, applied over the built-ins in order.
    /// An entry reusing a built-in name replaces that built-in.
    #[serde(default)]
    pub themes: Vec<ThemeEntry>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "themes[2].name")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "retheme.toml: '{}' {}", self.field, self.message)
    }
}

impl RethemeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (index, entry) in self.themes.iter().enumerate() {
            if entry.name.is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("themes[{}].name", index),
                    message: "must be a non-empty string".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Consume the config into registry override pairs, in file order.
    pub fn into_overrides(self) -> Vec<(String, Theme)> {
        self.themes.into_iter().map(ThemeEntry::into_parts).collect()
    }
}
