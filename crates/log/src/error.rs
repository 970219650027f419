//! Logging setup errors.

/// Error raised while installing the subscriber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The filter directive does not parse.
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter { directive: String, reason: String },

    /// A format name is not one of `pretty`, `compact` or `json`.
    #[error("unknown log format `{0}`")]
    Format(String),

    /// A global subscriber is already installed, or reloading failed.
    #[error("logger initialization failed: {0}")]
    Init(String),
}

impl LogError {
    pub(crate) fn filter(directive: &str, reason: impl ToString) -> Self {
        Self::Filter {
            directive: directive.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
