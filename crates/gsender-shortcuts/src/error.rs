//! Error types for the shortcut registry.

use thiserror::Error;

/// Errors reported by registry edits
///
/// Conflicts are recoverable: the registry is unchanged and the caller may
/// pick another combination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// No shortcut is registered under this id.
    #[error("Unknown shortcut: {0}")]
    Unknown(String),

    /// The combination is already owned by other shortcuts.
    #[error("Key combination already used by {}", ids.join(", "))]
    Conflict {
        /// Shortcuts currently holding the combination.
        ids: Vec<String>,
    },

    /// A capture operation was attempted outside edit mode.
    #[error("Not capturing a shortcut")]
    NotCapturing,

    /// Commit was requested before any key was captured.
    #[error("No key combination captured")]
    NothingCaptured,
}

/// Result type alias for registry operations.
pub type ShortcutResult<T> = Result<T, ShortcutError>;
