//! Theme detection and substitution engine.
//!
//! Holds the one piece of session state: the name of the theme believed to
//! be present in the text last operated on. Detection is a counting
//! heuristic over the signatures the game itself ships; substitution is a
//! single simultaneous pass over the document.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::RethemeError;
use crate::models::Theme;
use crate::registry::{ThemeRegistry, ThemeWarning};
use crate::themes;

/// Matches a share-output header line like `Wordle 245 4/6`.
fn result_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"Wordle \d+ \d/\d").expect("hard-coded pattern compiles"))
}

/// Options for a single re-theme call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RethemeOptions {
    /// Re-run detection on the text even when a previously applied theme is
    /// remembered. The default keeps the remembered theme, which is what
    /// makes repeated re-theming of the same document stable.
    pub force_redetect: bool,
}

/// Stateful engine wrapping a [`ThemeRegistry`].
///
/// One engine per logical document context; the registry is owned
/// exclusively and the remembered theme is never written to durable
/// storage. Callers serialize access, there is no internal locking.
#[derive(Debug, Clone)]
pub struct ThemeEngine {
    registry: ThemeRegistry,
    recognized: Option<String>,
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeEngine {
    /// Create an engine over the built-in themes with no remembered theme.
    pub fn new() -> Self {
        Self::with_registry(ThemeRegistry::with_builtins())
    }

    /// Create an engine over a prepared registry.
    pub fn with_registry(registry: ThemeRegistry) -> Self {
        Self { registry, recognized: None }
    }

    /// Registered theme names in listing order.
    pub fn theme_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    /// Read access to the underlying registry.
    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Rebuild the registry from the built-ins plus `overrides`.
    ///
    /// The remembered theme is kept; if the reload removed it, the next
    /// re-theme fails with [`RethemeError::UnknownTheme`] rather than
    /// guessing.
    pub fn reload_themes(&mut self, overrides: Vec<(String, Theme)>) -> Vec<ThemeWarning> {
        self.registry.reload(overrides)
    }

    /// The theme the engine currently believes the text uses, if any.
    pub fn recognized(&self) -> Option<&str> {
        self.recognized.as_deref()
    }

    /// Forget the remembered theme so the next detection re-reads the text.
    pub fn reset_memory(&mut self) {
        self.recognized = None;
    }

    /// Cheap sanity gate: does the text contain a result header line?
    ///
    /// This is not a parse of the grid; it only guards against rewriting
    /// unrelated documents.
    pub fn is_result_text(&self, text: &str) -> bool {
        result_header().is_match(text)
    }

    /// Name of the theme the text appears to use.
    ///
    /// A remembered theme takes priority over re-detection, so after a
    /// successful re-theme this keeps returning the applied theme until
    /// [`ThemeEngine::reset_memory`] is called. Detection itself only knows
    /// the signatures that ship with the game: user-defined themes are
    /// applied, never inferred.
    pub fn detect_theme(&self, text: &str) -> String {
        if let Some(name) = &self.recognized {
            return name.clone();
        }
        run_detection(text)
    }

    /// Rewrite `text` from its current theme to `target` with default options.
    pub fn retheme(&mut self, text: &str, target: &str) -> Result<String, RethemeError> {
        self.retheme_with(text, target, RethemeOptions::default())
    }

    /// Rewrite `text` from its current theme to `target`.
    ///
    /// On success the remembered theme advances to `target`. On any failure
    /// the memory and the text are left untouched.
    pub fn retheme_with(
        &mut self,
        text: &str,
        target: &str,
        options: RethemeOptions,
    ) -> Result<String, RethemeError> {
        if !self.is_result_text(text) {
            return Err(RethemeError::InvalidInput);
        }

        let source_name =
            if options.force_redetect { run_detection(text) } else { self.detect_theme(text) };

        let target_theme = self
            .registry
            .get(target)
            .ok_or_else(|| RethemeError::UnknownTheme(target.to_string()))?;
        let source_theme = self
            .registry
            .get(&source_name)
            .ok_or_else(|| RethemeError::UnknownTheme(source_name.clone()))?;

        let new_text = substitute(text, source_theme, target_theme);
        self.recognized = Some(target.to_string());
        Ok(new_text)
    }
}

/// Count occurrences of the three candidate signatures and pick the strict
/// winner; ties and all-zero fall back to `Color Blind`.
fn run_detection(text: &str) -> String {
    let dark = signature_count(text, &themes::dark());
    let color_blind = signature_count(text, &themes::color_blind());
    let light = signature_count(text, &themes::light());

    if dark > light && dark > color_blind {
        "Dark".to_string()
    } else if light > dark && light > color_blind {
        "Light".to_string()
    } else {
        themes::FALLBACK_NAME.to_string()
    }
}

/// Total occurrences of a theme's three symbols in the text.
fn signature_count(text: &str, theme: &Theme) -> usize {
    theme.symbols().iter().map(|symbol| text.matches(symbol).count()).sum()
}

/// Replace every source symbol with its target counterpart in one pass.
///
/// A combined alternation over the source symbols with a lookup-based
/// replacer classifies each original occurrence exactly once, so a source
/// theme sharing symbols across fields, or with the target, cannot make a
/// later replacement re-match earlier output. When source fields share a
/// symbol the earliest field (exact, then present, then absent) wins.
fn substitute(text: &str, source: &Theme, target: &Theme) -> String {
    let mut mapping: HashMap<&str, &str> = HashMap::new();
    for (from, to) in [
        (source.exact.as_str(), target.exact.as_str()),
        (source.present.as_str(), target.present.as_str()),
        (source.absent.as_str(), target.absent.as_str()),
    ] {
        mapping.entry(from).or_insert(to);
    }

    let mut alternatives: Vec<&str> = mapping.keys().copied().collect();
    // Longest first so no alternative shadows a longer symbol it prefixes.
    alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let pattern =
        alternatives.iter().map(|s| regex::escape(s)).collect::<Vec<_>>().join("|");
    // Symbols are validated non-empty at registry load, so the alternation
    // is a well-formed pattern of escaped literals.
    let matcher = Regex::new(&pattern).expect("escaped symbol alternation compiles");

    matcher
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let found = caps.get(0).map_or("", |m| m.as_str());
            mapping.get(found).copied().unwrap_or(found).to_string()
        })
        .into_owned()
}
