//! Built-in theme definitions.
//!
//! Provides the themes that ship with the game's own share output plus a
//! couple of popular variants, referenced by display name.

use crate::models::Theme;

/// Built-in theme names in registry order.
pub const BUILTIN_NAMES: &[&str] = &["Dark", "Light", "Color Blind", "Heart"];

/// Name used when detection cannot pick a strict winner.
pub const FALLBACK_NAME: &str = "Color Blind";

/// Returns the built-in themes paired with their names, in fixed order.
pub fn builtin_themes() -> Vec<(String, Theme)> {
    vec![
        ("Dark".to_string(), dark()),
        ("Light".to_string(), light()),
        ("Color Blind".to_string(), color_blind()),
        ("Heart".to_string(), heart()),
    ]
}

/// Returns a built-in theme by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Theme> {
    match name {
        "Dark" => Some(dark()),
        "Light" => Some(light()),
        "Color Blind" => Some(color_blind()),
        "Heart" => Some(heart()),
        _ => None,
    }
}

/// Dark mode share output.
pub fn dark() -> Theme {
    Theme::new("🟩", "🟨", "⬛")
}

/// Light mode share output. Differs from dark only in the absent square.
pub fn light() -> Theme {
    Theme::new("🟩", "🟨", "⬜")
}

/// High-contrast color blind share output.
pub fn color_blind() -> Theme {
    Theme::new("🟧", "🟦", "⬜")
}

/// Heart variant.
pub fn heart() -> Theme {
    Theme::new("💚", "💛", "💔")
}

/// Historical `Apple` definition with empty symbols for every field.
///
/// Never registered: an empty symbol matches between every pair of
/// characters under pattern-based replacement, so registry load-time
/// validation skips it. Kept as a named constant so the hazard it
/// represents stays covered by tests.
pub fn legacy_apple() -> Theme {
    Theme::new("", "", "")
}
