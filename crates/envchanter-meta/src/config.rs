//! Run configuration
//!
//! A [`RunConfig`] is built once at the CLI boundary and passed to every
//! operation. Nothing reads flags or environment variables after that point.

use std::fmt;
use std::path::PathBuf;

use crate::backend::Backend;

/// Default local env-file path.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// How sync selects which differences to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncPolicy {
    /// Apply every difference without asking.
    Force,

    /// Ask about each difference in turn.
    #[default]
    Interactive,
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::Force => write!(f, "force"),
            SyncPolicy::Interactive => write!(f, "interactive"),
        }
    }
}

/// The operation a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Fetch every mapped value into the env-file.
    Pull,

    /// Store every mapped value present in the env-file.
    PushFile,

    /// Store one value at one identifier.
    PushSingle {
        name: String,
        value: String,
        identifier: String,
    },

    /// Reconcile the env-file with the remote store.
    Sync(SyncPolicy),
}

impl Operation {
    /// Whether this operation needs a mapping file.
    pub fn needs_mapping(&self) -> bool {
        !matches!(self, Operation::PushSingle { .. })
    }
}

/// Connection options handed to the store client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Named credentials profile.
    pub profile: Option<String>,
    /// Region override.
    pub region: Option<String>,
}

/// Everything one invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub operation: Operation,
    pub backend: Backend,
    /// Mapping file, required unless the operation is a single-key push.
    pub mapping_path: Option<PathBuf>,
    /// Env-file read by push and sync, written by pull and sync.
    pub env_path: PathBuf,
    /// Quote every value when writing the env-file.
    pub always_quote: bool,
    pub store: StoreOptions,
}

impl RunConfig {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            backend: Backend::default(),
            mapping_path: None,
            env_path: PathBuf::from(DEFAULT_ENV_FILE),
            always_quote: false,
            store: StoreOptions::default(),
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_mapping(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = Some(path.into());
        self
    }

    pub fn with_env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_path = path.into();
        self
    }

    pub fn with_always_quote(mut self, always_quote: bool) -> Self {
        self.always_quote = always_quote;
        self
    }

    pub fn with_store(mut self, store: StoreOptions) -> Self {
        self.store = store;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_display() {
        assert_eq!(SyncPolicy::Force.to_string(), "force");
        assert_eq!(SyncPolicy::default().to_string(), "interactive");
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new(Operation::Pull);
        assert_eq!(config.env_path, PathBuf::from(".env"));
        assert_eq!(config.backend, Backend::ParameterStore);
        assert!(!config.always_quote);
        assert!(config.mapping_path.is_none());
    }

    #[test]
    fn test_single_push_needs_no_mapping() {
        let single = Operation::PushSingle {
            name: "A".into(),
            value: "1".into(),
            identifier: "/a".into(),
        };
        assert!(!single.needs_mapping());
        assert!(Operation::Pull.needs_mapping());
        assert!(Operation::Sync(SyncPolicy::Force).needs_mapping());
    }
}
