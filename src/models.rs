//! Theme value types.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A named trio of feedback symbols used in a shareable result grid.
///
/// Each field holds the symbol for one feedback kind. A symbol is intended
/// to be a single grapheme, though it may span several codepoints (most
/// emoji do). The three symbols are not guaranteed to be pairwise distinct;
/// substitution logic must not assume they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Symbol for "letter correct, position correct".
    pub exact: String,
    /// Symbol for "letter correct, position wrong".
    pub present: String,
    /// Symbol for "letter not present".
    pub absent: String,
}

impl Theme {
    /// Create a theme from three symbols.
    pub fn new(exact: impl Into<String>, present: impl Into<String>, absent: impl Into<String>) -> Self {
        Self { exact: exact.into(), present: present.into(), absent: absent.into() }
    }

    /// The three symbols in field order: exact, present, absent.
    pub fn symbols(&self) -> [&str; 3] {
        [&self.exact, &self.present, &self.absent]
    }
}

/// A theme override record as it appears in configuration.
///
/// Same shape whether it comes from a `[[themes]]` table in `retheme.toml`
/// or an entry in a JSON override file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    pub exact: String,
    pub present: String,
    pub absent: String,
}

impl ThemeEntry {
    /// Split the entry into its registry key and theme value.
    pub fn into_parts(self) -> (String, Theme) {
        (self.name, Theme { exact: self.exact, present: self.present, absent: self.absent })
    }
}

impl From<ThemeEntry> for (String, Theme) {
    fn from(entry: ThemeEntry) -> Self {
        entry.into_parts()
    }
}

/// Check that a symbol is usable as a substitution unit: non-empty and
/// exactly one extended grapheme cluster.
///
/// An empty symbol would match everywhere under pattern-based replacement,
/// including between characters; a multi-grapheme symbol would make counts
/// and replacements disagree with what a reader sees as one square.
pub fn is_valid_symbol(symbol: &str) -> bool {
    symbol.graphemes(true).count() == 1
}
