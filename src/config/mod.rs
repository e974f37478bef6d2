//! Configuration for user-defined theme overrides.
//!
//! Overrides live in `retheme.toml` (discovered by walking up from the
//! working directory, then XDG config) or in a JSON file passed explicitly.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, load_overrides_json, ConfigError};
pub use schema::{ConfigValidationError, RethemeConfig};
