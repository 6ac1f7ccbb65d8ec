//! Error types for jsonconf-template

/// Result type for jsonconf-template operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating templates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed template expression '{expression}': {reason}")]
    Syntax { expression: String, reason: String },

    #[error("No resolver registered under '{name}'")]
    UnknownResolver { name: String },

    #[error("Resolver '{resolver}' has no method '{method}'")]
    UnknownMethod { resolver: String, method: String },

    #[error("Invalid arguments for {resolver}.{method}: {reason}")]
    InvalidArguments {
        resolver: String,
        method: String,
        reason: String,
    },

    #[error("{resolver}.{method} failed: {source}")]
    Resolver {
        resolver: String,
        method: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Template evaluation exceeded the maximum depth of {max_depth}")]
    RecursionLimit { max_depth: usize },
}

impl Error {
    /// True when this error, or any error in its source chain, is a
    /// [`Error::RecursionLimit`].
    pub fn is_recursion_limit(&self) -> bool {
        caused_by_recursion_limit(self)
    }
}

/// Walk a source chain looking for [`Error::RecursionLimit`].
pub fn caused_by_recursion_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(Error::RecursionLimit { .. }) = e.downcast_ref::<Error>() {
            return true;
        }
        current = e.source();
    }
    false
}
