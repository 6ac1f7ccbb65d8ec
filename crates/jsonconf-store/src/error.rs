//! Error types for jsonconf-store

use std::path::PathBuf;

/// Result type for jsonconf-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jsonconf-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid pointer '{pointer}': {reason}")]
    InvalidPointer { pointer: String, reason: String },

    #[error("Path not found: {pointer}")]
    PathNotFound { pointer: String },

    #[error("Index {index} out of bounds for array of length {len} at {pointer}")]
    IndexOutOfBounds {
        pointer: String,
        index: isize,
        len: usize,
    },

    #[error("Cannot set path {pointer}: {reason}")]
    PathSetFailed { pointer: String, reason: String },

    #[error("Cannot merge {incoming} into {existing} at {pointer}")]
    MergeConflict {
        pointer: String,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("Failed to parse JSON document at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] jsonconf_fs::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_pointer(pointer: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPointer {
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(pointer: &str) -> Self {
        Self::PathNotFound {
            pointer: pointer.to_string(),
        }
    }

    /// True when the pointer simply does not resolve in the document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. } | Self::IndexOutOfBounds { .. })
    }
}
