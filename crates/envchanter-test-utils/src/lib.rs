//! Shared test fixtures for the envchanter workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace), a temp
//!   directory holding a mapping file and an env-file
//! - [`MemoryStore`]: the in-memory remote store, re-exported with the
//!   `test-support` feature of envchanter-core switched on

pub mod workspace;

pub use workspace::TestWorkspace;
pub use envchanter_core::store::{MemoryStore, StoreCall};
