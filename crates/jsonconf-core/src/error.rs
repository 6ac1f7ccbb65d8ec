//! Error types for jsonconf-core

use std::path::PathBuf;

/// Result type for jsonconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed path argument, a pointer that does not resolve, or a value
    /// that `get` could not read or evaluate
    InvalidPath,
    /// Configuration file absent and creation not requested
    ConfigNotFound,
    /// Configuration directory absent
    DirectoryNotFound,
    /// Operation precondition violated
    InvalidArgument,
    /// Template evaluation failed
    Template,
    /// Storage or filesystem failure
    Storage,
}

/// Errors that can occur in jsonconf-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A path argument is malformed
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The pointer does not resolve inside the configuration document
    #[error("The json configuration ({pointer}) does not exist in '{name}'")]
    ValueNotFound {
        name: String,
        pointer: String,
        #[source]
        source: jsonconf_store::Error,
    },

    /// The value exists but could not be read or evaluated
    #[error("The json configuration ({pointer}) in '{name}' could not be read: {source}")]
    Unreadable {
        name: String,
        pointer: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration file not found and creation not requested
    #[error("Configuration '{name}' not found at {path}")]
    ConfigNotFound { name: String, path: PathBuf },

    /// Configuration directory does not exist
    #[error("The directory {path} does not exist")]
    DirectoryNotFound { path: PathBuf },

    /// Operation precondition violated
    #[error("Invalid argument for '{name}' at {pointer}: {message}")]
    InvalidArgument {
        name: String,
        pointer: String,
        message: String,
    },

    /// Template evaluation error
    #[error("{0}")]
    Template(#[from] jsonconf_template::Error),

    // Transparent wrappers for underlying crate errors
    /// Storage error from jsonconf-store
    #[error(transparent)]
    Store(#[from] jsonconf_store::Error),

    /// Filesystem error from jsonconf-fs
    #[error(transparent)]
    Fs(#[from] jsonconf_fs::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath { .. } | Self::ValueNotFound { .. } | Self::Unreadable { .. } => {
                ErrorKind::InvalidPath
            }
            Self::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            Self::DirectoryNotFound { .. } => ErrorKind::DirectoryNotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Template(_) => ErrorKind::Template,
            Self::Store(_) | Self::Fs(_) => ErrorKind::Storage,
        }
    }

    /// True when template evaluation stopped at the recursion limit,
    /// however deeply the failure was wrapped.
    pub fn is_recursion_limit(&self) -> bool {
        jsonconf_template::error::caused_by_recursion_limit(self)
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
