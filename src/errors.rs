//! Error types for refquest operations.
//!
//! The library surface returns [`Result`] with the [`Error`] enum below. The
//! binary and command handlers wrap these in `anyhow` for context trails.
//!
//! Expected outcomes (unrecognized identifiers, duplicate detections) are not
//! errors: they are reported through [`crate::session::HandleOutcome`]. Errors
//! here mean a caller broke an API contract or an I/O boundary failed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for refquest operations
#[derive(Debug, Error)]
pub enum Error {
    /// A quest violates a construction invariant
    #[error("Invalid quest '{id}': {reason}")]
    InvalidQuest { id: String, reason: String },

    /// A quest with the same id is already registered
    #[error("Quest '{0}' is already registered")]
    DuplicateQuest(String),

    /// A persisted kind identifier does not name a known refactoring kind
    #[error("Unknown refactoring kind: {0}")]
    UnknownKind(String),

    /// A persisted record cannot be decoded
    #[error("Invalid persisted record: {0}")]
    InvalidRecord(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid-quest error
    pub fn invalid_quest(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuest {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create an unknown-kind error
    pub fn unknown_kind(id: impl Into<String>) -> Self {
        Self::UnknownKind(id.into())
    }

    /// Whether the error stems from bad input the caller can fix
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuest { .. } | Self::DuplicateQuest(_) | Self::Config(_) | Self::Toml(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
