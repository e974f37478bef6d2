//! Registry for named themes.

use std::collections::HashMap;

use crate::models::{is_valid_symbol, Theme};
use crate::themes;

/// Warning emitted when a theme entry is skipped during a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeWarning {
    pub message: String,
}

impl ThemeWarning {
    pub fn bad_symbol(name: &str, field: &str, symbol: &str) -> Self {
        Self {
            message: format!(
                "Theme '{}' skipped: {} symbol {:?} is not a single non-empty grapheme",
                name, field, symbol
            ),
        }
    }

    pub fn empty_name() -> Self {
        Self { message: "Theme with empty name skipped".to_string() }
    }
}

/// Registry mapping theme names to their symbol definitions.
///
/// Listing order is insertion order: built-ins first, then overrides in the
/// order they were supplied. An override that reuses a built-in name keeps
/// the built-in's position but replaces its value.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    order: Vec<String>,
}

impl ThemeRegistry {
    /// Create an empty registry. Most callers want [`ThemeRegistry::with_builtins`].
    pub fn new() -> Self {
        Self { themes: HashMap::new(), order: Vec::new() }
    }

    /// Create a registry seeded with the built-in themes and no overrides.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.reload(Vec::new());
        registry
    }

    /// Rebuild the registry: clear everything, insert the built-ins in fixed
    /// order, then apply `overrides` in the given order (later entries win on
    /// name collision).
    ///
    /// Entries whose name is empty or whose symbols are not each a single
    /// non-empty grapheme are skipped and reported as warnings. An empty
    /// symbol would match everywhere under pattern-based substitution, so
    /// accepting one silently would corrupt documents.
    pub fn reload(&mut self, overrides: Vec<(String, Theme)>) -> Vec<ThemeWarning> {
        self.themes.clear();
        self.order.clear();

        for (name, theme) in themes::builtin_themes() {
            self.insert(name, theme);
        }

        let mut warnings = Vec::new();
        for (name, theme) in overrides {
            match validate_entry(&name, &theme) {
                Ok(()) => self.insert(name, theme),
                Err(warning) => warnings.push(warning),
            }
        }
        warnings
    }

    /// Insert or replace a theme. First insertion of a name records its
    /// listing position; replacement keeps it.
    fn insert(&mut self, name: String, theme: Theme) {
        if !self.themes.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.themes.insert(name, theme);
    }

    /// Get a theme by name. Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Check if a theme with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Get the number of themes in the registry.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Iterate over all theme names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Validate a theme entry for registration.
fn validate_entry(name: &str, theme: &Theme) -> Result<(), ThemeWarning> {
    if name.is_empty() {
        return Err(ThemeWarning::empty_name());
    }
    for (field, symbol) in
        [("exact", &theme.exact), ("present", &theme.present), ("absent", &theme.absent)]
    {
        if !is_valid_symbol(symbol) {
            return Err(ThemeWarning::bad_symbol(name, field, symbol));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ocean() -> (String, Theme) {
        ("Ocean".to_string(), Theme::new("🐬", "🐠", "🌊"))
    }

    #[test]
    fn test_with_builtins_seeds_four_themes() {
        let registry = ThemeRegistry::with_builtins();
        assert_eq!(registry.len(), 4);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Dark", "Light", "Color Blind", "Heart"]);
    }

    #[test]
    fn test_get_and_contains() {
        let registry = ThemeRegistry::with_builtins();
        assert!(registry.contains("Dark"));
        assert_eq!(registry.get("Dark"), Some(&themes::dark()));
        assert!(!registry.contains("dark"), "lookup is case-sensitive");
        assert!(registry.get("Neon").is_none());
    }

    #[test]
    fn test_reload_appends_overrides_in_order() {
        let mut registry = ThemeRegistry::new();
        let warnings = registry.reload(vec![
            ocean(),
            ("Fire".to_string(), Theme::new("🔥", "🟠", "🪵")),
        ]);
        assert!(warnings.is_empty());

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Dark", "Light", "Color Blind", "Heart", "Ocean", "Fire"]);
    }

    #[test]
    fn test_override_of_builtin_keeps_position_takes_value() {
        let mut registry = ThemeRegistry::new();
        let replacement = Theme::new("✅", "☑", "❌");
        registry.reload(vec![("Light".to_string(), replacement.clone())]);

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Dark", "Light", "Color Blind", "Heart"]);
        assert_eq!(registry.get("Light"), Some(&replacement));
    }

    #[test]
    fn test_later_override_wins_on_collision() {
        let mut registry = ThemeRegistry::new();
        let second = Theme::new("🅱", "🅾", "🅿");
        registry.reload(vec![ocean(), ("Ocean".to_string(), second.clone())]);

        assert_eq!(registry.get("Ocean"), Some(&second));
        assert_eq!(registry.names().filter(|n| *n == "Ocean").count(), 1);
    }

    #[test]
    fn test_reload_clears_previous_overrides() {
        let mut registry = ThemeRegistry::new();
        registry.reload(vec![ocean()]);
        assert!(registry.contains("Ocean"));

        registry.reload(Vec::new());
        assert!(!registry.contains("Ocean"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_reload_skips_empty_symbols_with_warning() {
        let mut registry = ThemeRegistry::new();
        let warnings =
            registry.reload(vec![("Apple".to_string(), crate::themes::legacy_apple())]);

        assert!(!registry.contains("Apple"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Apple"));
    }

    #[test]
    fn test_reload_skips_multi_grapheme_symbols() {
        let mut registry = ThemeRegistry::new();
        let warnings = registry
            .reload(vec![("Wide".to_string(), Theme::new("🟩🟩", "🟨", "⬛"))]);

        assert!(!registry.contains("Wide"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("exact"));
    }

    #[test]
    fn test_reload_skips_empty_name() {
        let mut registry = ThemeRegistry::new();
        let warnings = registry.reload(vec![(String::new(), Theme::new("🐬", "🐠", "🌊"))]);

        assert_eq!(registry.len(), 4);
        assert_eq!(warnings, vec![ThemeWarning::empty_name()]);
    }

    #[test]
    fn test_skipped_entry_does_not_block_later_ones() {
        let mut registry = ThemeRegistry::new();
        let warnings = registry.reload(vec![
            ("Apple".to_string(), crate::themes::legacy_apple()),
            ocean(),
        ]);

        assert_eq!(warnings.len(), 1);
        assert!(registry.contains("Ocean"));
    }
}
