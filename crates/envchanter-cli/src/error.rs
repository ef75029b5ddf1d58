//! Error types for envchanter-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from envchanter-core
    #[error(transparent)]
    Core(#[from] envchanter_core::Error),

    /// Error from envchanter-meta
    #[error(transparent)]
    Meta(#[from] envchanter_meta::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
