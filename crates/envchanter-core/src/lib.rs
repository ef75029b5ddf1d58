//! Core engine for envchanter
//!
//! This crate moves environment values between a local env-file and a remote
//! secret store:
//!
//! - [`envfile`]: parse and serialize the `KEY=VALUE` file format
//! - [`store`]: the fetch/store capability and its backends
//! - [`transfer`]: one-directional pull and push
//! - [`sync`]: difference computation and policy-driven reconciliation

pub mod envfile;
pub mod error;
pub mod store;
pub mod sync;
pub mod transfer;

pub use envfile::Snapshot;
pub use error::{Error, Result};
pub use store::{SecretStore, StoreError, open_store};
#[cfg(any(test, feature = "test-support"))]
pub use store::{MemoryStore, StoreCall};
pub use sync::{
    Decision, Difference, ScriptedInteraction, SyncEngine, SyncInteraction, SyncOutcome,
    compute_differences,
};
pub use transfer::{PullReport, PushReport};

// Re-export the mapping layer so callers need only one crate.
pub use envchanter_meta::{Backend, Mapping, RunConfig, SyncPolicy};
