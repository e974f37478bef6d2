//! Error kinds for the re-theming operation.

use thiserror::Error;

/// Error when validating or re-theming a document.
///
/// Every failure is terminal for the current operation and leaves the
/// engine's theme memory untouched; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RethemeError {
    /// No document or text context to operate on.
    #[error("no active text to re-theme; open a file and paste in the results")]
    NoActiveSource,
    /// Text fails the result-header sanity check. Refusing to substitute
    /// protects unrelated documents from silent corruption.
    #[error("text is missing a results heading, not applied for safety reasons")]
    InvalidInput,
    /// Requested target or detected source theme is not registered.
    #[error("theme '{0}' does not exist")]
    UnknownTheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert!(RethemeError::NoActiveSource.to_string().contains("no active text"));
        assert!(RethemeError::InvalidInput.to_string().contains("safety"));
        assert_eq!(
            RethemeError::UnknownTheme("Neon".to_string()).to_string(),
            "theme 'Neon' does not exist"
        );
    }
}
