//! Watch mode for automatic re-theming on file changes
//!
//! Watches a result document and the override configuration with
//! debouncing. A config change reloads the registry; a document change
//! re-applies the selected theme in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, SystemTime};

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use thiserror::Error;

use crate::config;
use crate::engine::{RethemeOptions, ThemeEngine};

/// Default debounce window between a file event and a re-apply.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Error during watch mode
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch path: {0}")]
    WatchPath(notify::Error),
    /// Channel receive error
    #[error("Watch channel error: {0}")]
    Channel(String),
    /// Input file not found
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// Options for watch mode
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Document to watch and rewrite in place
    pub input: PathBuf,
    /// Theme to keep the document in
    pub theme: String,
    /// Explicit config path; discovered when None
    pub config_path: Option<PathBuf>,
    /// Debounce delay in milliseconds
    pub debounce_ms: u64,
}

impl WatchOptions {
    pub fn new(input: impl Into<PathBuf>, theme: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            theme: theme.into(),
            config_path: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Get current timestamp for logging
fn timestamp() -> String {
    let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = now.as_secs() % 86400;
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Re-read the document and apply the theme, writing back only when the
/// text actually changed so our own write does not retrigger a cycle.
///
/// Each change may be a fresh paste in a different palette, so detection
/// always re-runs instead of trusting the remembered theme. Re-theme
/// failures are reported and swallowed; watching continues.
fn apply_once(engine: &mut ThemeEngine, input: &Path, theme: &str) -> std::io::Result<bool> {
    let text = fs::read_to_string(input)?;
    let options = RethemeOptions { force_redetect: true };
    match engine.retheme_with(&text, theme, options) {
        Ok(new_text) if new_text != text => {
            fs::write(input, new_text)?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(err) => {
            eprintln!("[{}] Error: {}", timestamp(), err);
            Ok(false)
        }
    }
}

/// Reload override configuration into the engine, reporting skipped entries.
fn reload_config(engine: &mut ThemeEngine, config_path: Option<&Path>) {
    match config::load_config(config_path) {
        Ok(cfg) => {
            for warning in crate::host::reload_from(engine, &cfg) {
                eprintln!("[{}] Warning: {}", timestamp(), warning.message);
            }
        }
        Err(err) => eprintln!("[{}] Error: {}", timestamp(), err),
    }
}

/// Watch the document and configuration, re-applying the theme on changes.
///
/// Blocks until interrupted (Ctrl+C). Individual re-theme and reload
/// failures are non-fatal; the loop keeps watching.
pub fn watch_and_reapply(options: WatchOptions) -> Result<(), WatchError> {
    if !options.input.exists() {
        return Err(WatchError::InputNotFound(options.input.clone()));
    }

    let input = fs::canonicalize(&options.input).unwrap_or_else(|_| options.input.clone());
    let config_path = options
        .config_path
        .clone()
        .or_else(config::find_config)
        .map(|p| fs::canonicalize(&p).unwrap_or(p));

    let mut engine = ThemeEngine::new();
    reload_config(&mut engine, config_path.as_deref());

    let (tx, rx) = channel();
    let debounce = Duration::from_millis(options.debounce_ms);
    let mut debouncer = new_debouncer(debounce, tx).map_err(WatchError::WatcherInit)?;

    debouncer
        .watcher()
        .watch(&input, RecursiveMode::NonRecursive)
        .map_err(WatchError::WatchPath)?;
    if let Some(cfg) = &config_path {
        // Config is optional; a vanished file just stops producing events.
        if let Err(err) = debouncer.watcher().watch(cfg, RecursiveMode::NonRecursive) {
            eprintln!("[{}] Warning: not watching config: {}", timestamp(), err);
        }
    }

    // Initial pass so the document starts out in the requested theme.
    if let Err(err) = apply_once(&mut engine, &input, &options.theme) {
        eprintln!("[{}] Error: {}", timestamp(), err);
    }
    println!("[{}] Watching {} for changes...", timestamp(), input.display());

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let mut reload = false;
                let mut reapply = false;
                for event in &events {
                    if !matches!(event.kind, DebouncedEventKind::Any) {
                        continue;
                    }
                    if config_path.as_deref() == Some(event.path.as_path()) {
                        reload = true;
                    }
                    if event.path == input {
                        reapply = true;
                    }
                }

                if reload {
                    println!("[{}] Configuration changed, reloading themes", timestamp());
                    reload_config(&mut engine, config_path.as_deref());
                    reapply = true;
                }

                if reapply {
                    match apply_once(&mut engine, &input, &options.theme) {
                        Ok(true) => {
                            println!("[{}] Re-themed {}", timestamp(), input.display())
                        }
                        Ok(false) => {}
                        Err(err) => eprintln!("[{}] Error: {}", timestamp(), err),
                    }
                }
            }
            Ok(Err(error)) => {
                // Watch error (non-fatal) - log but continue watching
                eprintln!("[{}] Watch error: {:?}", timestamp(), error);
            }
            Err(e) => {
                return Err(WatchError::Channel(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_watch_options_defaults() {
        let options = WatchOptions::new("results.txt", "Heart");
        assert_eq!(options.input, PathBuf::from("results.txt"));
        assert_eq!(options.theme, "Heart");
        assert!(options.config_path.is_none());
        assert_eq!(options.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn test_watch_error_input_not_found() {
        let options = WatchOptions::new("/nonexistent/results.txt", "Heart");
        let result = watch_and_reapply(options);
        assert!(matches!(result, Err(WatchError::InputNotFound(_))));
    }

    #[test]
    fn test_apply_once_rewrites_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.txt");
        fs::write(&path, "Wordle 245 4/6\n🟩🟨⬛⬛⬛").unwrap();

        let mut engine = ThemeEngine::new();
        let changed = apply_once(&mut engine, &path, "Heart").unwrap();
        assert!(changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Wordle 245 4/6\n💚💛💔💔💔");
    }

    #[test]
    fn test_apply_once_settles_after_rewrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.txt");
        fs::write(&path, "Wordle 245 4/6\n🟩🟨⬛⬛⬛").unwrap();

        let mut engine = ThemeEngine::new();
        apply_once(&mut engine, &path, "Heart").unwrap();
        let changed = apply_once(&mut engine, &path, "Heart").unwrap();
        assert!(!changed, "already-themed text must not be rewritten again");
    }

    #[test]
    fn test_apply_once_skips_non_result_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "shopping list").unwrap();

        let mut engine = ThemeEngine::new();
        let changed = apply_once(&mut engine, &path, "Heart").unwrap();
        assert!(!changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "shopping list");
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
