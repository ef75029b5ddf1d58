//! Error types for envchanter-core

use std::path::PathBuf;

use crate::store::StoreError;

/// Result type for envchanter-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envchanter-core operations
///
/// Remote identifiers are kept out of these messages; the local variable
/// name is enough for the user to find the entry in the mapping file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Env-file text has a line without `=`
    #[error("Malformed line {line}: expected KEY=VALUE")]
    MalformedLine { line: usize },

    /// Same as [`Error::MalformedLine`], with the file it came from
    #[error("Malformed env-file {path} at line {line}: expected KEY=VALUE")]
    MalformedEnvFile { path: PathBuf, line: usize },

    /// A remote read failed for a reason other than "not found"
    #[error("Failed to fetch value for {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: StoreError,
    },

    /// A single remote write failed
    #[error("Failed to store value for {name}: {source}")]
    Store {
        name: String,
        #[source]
        source: StoreError,
    },

    /// A write failed partway through a batch; earlier writes stay applied
    #[error(
        "Failed to store value for {name} after {pushed} successful write(s); some parameters may have already been updated: {source}"
    )]
    PushAborted {
        name: String,
        pushed: usize,
        #[source]
        source: StoreError,
    },

    /// The interactive decision source failed
    #[error("Failed to read decision: {message}")]
    Decision { message: String },

    /// The remote store client could not be set up
    #[error(transparent)]
    StoreSetup(StoreError),

    /// Filesystem error from envchanter-fs
    #[error(transparent)]
    Fs(#[from] envchanter_fs::Error),

    /// Mapping or validation error from envchanter-meta
    #[error(transparent)]
    Meta(#[from] envchanter_meta::Error),
}
