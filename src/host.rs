//! Host integration seams.
//!
//! The engine itself performs no I/O. These traits are the contracts a host
//! (an editor plugin, the CLI, a test harness) implements to wire the engine
//! into its document access, user prompting, configuration, and error
//! reporting, plus the command flow that ties them together.

use crate::engine::{RethemeOptions, ThemeEngine};
use crate::error::RethemeError;
use crate::models::ThemeEntry;
use crate::registry::ThemeWarning;

/// Access to the document being re-themed.
pub trait Workspace {
    /// Full text of the active document, or None when nothing is open.
    fn current_text(&self) -> Option<String>;

    /// Replace the active document's entire contents. Returns false when the
    /// host rejected the edit.
    fn replace_all(&mut self, new_text: &str) -> bool;
}

/// Lets the user choose a theme from the registered names.
pub trait ThemePicker {
    /// Returns the chosen name, or None when the user cancelled. A cancel
    /// means no transform is attempted.
    fn pick(&mut self, names: &[String]) -> Option<String>;
}

/// Surface for user-visible error messages.
pub trait Notifier {
    fn error(&mut self, message: &str);
}

/// Reader for user-defined theme overrides.
pub trait OverrideSource {
    fn theme_overrides(&self) -> Vec<ThemeEntry>;
}

impl OverrideSource for crate::config::RethemeConfig {
    fn theme_overrides(&self) -> Vec<ThemeEntry> {
        self.themes.clone()
    }
}

/// The interactive "change theme" command.
///
/// Lists the registered names, lets the picker choose a target, re-themes
/// the workspace text and writes it back. Failures go to the notifier; a
/// cancelled pick is a quiet no-op. Returns true when the document was
/// rewritten.
pub fn change_theme(
    engine: &mut ThemeEngine,
    workspace: &mut impl Workspace,
    picker: &mut impl ThemePicker,
    notifier: &mut impl Notifier,
) -> bool {
    change_theme_with(engine, workspace, picker, notifier, RethemeOptions::default())
}

/// [`change_theme`] with explicit re-theme options.
pub fn change_theme_with(
    engine: &mut ThemeEngine,
    workspace: &mut impl Workspace,
    picker: &mut impl ThemePicker,
    notifier: &mut impl Notifier,
    options: RethemeOptions,
) -> bool {
    let names = engine.theme_names();
    let Some(target) = picker.pick(&names) else {
        return false;
    };

    let Some(text) = workspace.current_text() else {
        notifier.error(&RethemeError::NoActiveSource.to_string());
        return false;
    };

    match engine.retheme_with(&text, &target, options) {
        Ok(new_text) => {
            if workspace.replace_all(&new_text) {
                true
            } else {
                notifier.error("could not write the re-themed text back");
                false
            }
        }
        Err(err) => {
            notifier.error(&err.to_string());
            false
        }
    }
}

/// Respond to a configuration change: re-read the overrides and rebuild the
/// engine's registry.
pub fn reload_from(engine: &mut ThemeEngine, source: &impl OverrideSource) -> Vec<ThemeWarning> {
    let overrides =
        source.theme_overrides().into_iter().map(ThemeEntry::into_parts).collect();
    engine.reload_themes(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeWorkspace {
        text: Option<String>,
        accept_edits: bool,
    }

    impl FakeWorkspace {
        fn with_text(text: &str) -> Self {
            Self { text: Some(text.to_string()), accept_edits: true }
        }

        fn empty() -> Self {
            Self { text: None, accept_edits: true }
        }
    }

    impl Workspace for FakeWorkspace {
        fn current_text(&self) -> Option<String> {
            self.text.clone()
        }

        fn replace_all(&mut self, new_text: &str) -> bool {
            if self.accept_edits {
                self.text = Some(new_text.to_string());
            }
            self.accept_edits
        }
    }

    struct FixedPicker(Option<String>);

    impl ThemePicker for FixedPicker {
        fn pick(&mut self, _names: &[String]) -> Option<String> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        errors: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    struct FixedOverrides(Vec<ThemeEntry>);

    impl OverrideSource for FixedOverrides {
        fn theme_overrides(&self) -> Vec<ThemeEntry> {
            self.0.clone()
        }
    }

    #[test]
    fn test_change_theme_rewrites_document() {
        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::with_text("Wordle 245 4/6\n🟩🟨⬛⬛⬛");
        let mut picker = FixedPicker(Some("Heart".to_string()));
        let mut notifier = RecordingNotifier::default();

        assert!(change_theme(&mut engine, &mut workspace, &mut picker, &mut notifier));
        assert_eq!(workspace.text.as_deref(), Some("Wordle 245 4/6\n💚💛💔💔💔"));
        assert!(notifier.errors.is_empty());
        assert_eq!(engine.recognized(), Some("Heart"));
    }

    #[test]
    fn test_change_theme_cancel_is_quiet_noop() {
        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::with_text("Wordle 245 4/6\n🟩🟨⬛");
        let mut picker = FixedPicker(None);
        let mut notifier = RecordingNotifier::default();

        assert!(!change_theme(&mut engine, &mut workspace, &mut picker, &mut notifier));
        assert_eq!(workspace.text.as_deref(), Some("Wordle 245 4/6\n🟩🟨⬛"));
        assert!(notifier.errors.is_empty());
        assert_eq!(engine.recognized(), None);
    }

    #[test]
    fn test_change_theme_no_document_reports_error() {
        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::empty();
        let mut picker = FixedPicker(Some("Heart".to_string()));
        let mut notifier = RecordingNotifier::default();

        assert!(!change_theme(&mut engine, &mut workspace, &mut picker, &mut notifier));
        assert_eq!(notifier.errors.len(), 1);
        assert!(notifier.errors[0].contains("no active text"));
    }

    #[test]
    fn test_change_theme_invalid_text_reports_error() {
        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::with_text("meeting notes, no grid here");
        let mut picker = FixedPicker(Some("Heart".to_string()));
        let mut notifier = RecordingNotifier::default();

        assert!(!change_theme(&mut engine, &mut workspace, &mut picker, &mut notifier));
        assert_eq!(workspace.text.as_deref(), Some("meeting notes, no grid here"));
        assert_eq!(notifier.errors.len(), 1);
        assert!(notifier.errors[0].contains("safety"));
    }

    #[test]
    fn test_change_theme_rejected_edit_reports_error() {
        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::with_text("Wordle 245 4/6\n🟩🟨⬛");
        workspace.accept_edits = false;
        let mut picker = FixedPicker(Some("Heart".to_string()));
        let mut notifier = RecordingNotifier::default();

        assert!(!change_theme(&mut engine, &mut workspace, &mut picker, &mut notifier));
        assert_eq!(notifier.errors.len(), 1);
        assert!(notifier.errors[0].contains("write"));
    }

    #[test]
    fn test_picker_sees_registered_names() {
        struct AssertingPicker;

        impl ThemePicker for AssertingPicker {
            fn pick(&mut self, names: &[String]) -> Option<String> {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                assert_eq!(names, vec!["Dark", "Light", "Color Blind", "Heart"]);
                None
            }
        }

        let mut engine = ThemeEngine::new();
        let mut workspace = FakeWorkspace::empty();
        let mut notifier = RecordingNotifier::default();
        change_theme(&mut engine, &mut workspace, &mut AssertingPicker, &mut notifier);
    }

    #[test]
    fn test_reload_from_applies_overrides() {
        let mut engine = ThemeEngine::new();
        let source = FixedOverrides(vec![ThemeEntry {
            name: "Ocean".to_string(),
            exact: "🐬".to_string(),
            present: "🐠".to_string(),
            absent: "🌊".to_string(),
        }]);

        let warnings = reload_from(&mut engine, &source);
        assert!(warnings.is_empty());
        assert!(engine.registry().contains("Ocean"));
    }

    #[test]
    fn test_config_file_is_an_override_source() {
        let cfg: crate::config::RethemeConfig = toml::from_str(
            "[[themes]]\nname = \"Ocean\"\nexact = \"🐬\"\npresent = \"🐠\"\nabsent = \"🌊\"\n",
        )
        .unwrap();

        let mut engine = ThemeEngine::new();
        let warnings = reload_from(&mut engine, &cfg);
        assert!(warnings.is_empty());
        assert!(engine.registry().contains("Ocean"));
    }

    #[test]
    fn test_reload_from_reports_skipped_entries() {
        let mut engine = ThemeEngine::new();
        let source = FixedOverrides(vec![ThemeEntry {
            name: "Apple".to_string(),
            exact: String::new(),
            present: String::new(),
            absent: String::new(),
        }]);

        let warnings = reload_from(&mut engine, &source);
        assert_eq!(warnings.len(), 1);
        assert!(!engine.registry().contains("Apple"));
    }
}
