//! Error types for envchanter-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] envchanter_fs::Error),

    #[error("Malformed mapping file {path}: {message}")]
    MalformedInput { path: PathBuf, message: String },

    #[error("Mapping is empty")]
    EmptyMapping,

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid backend: {backend}")]
    InvalidBackend { backend: String },
}

impl Error {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
