//! Mapping and configuration layer for envchanter.
//!
//! This crate loads the mapping file that associates local environment
//! variable names with remote identifiers, validates both sides against the
//! active backend's naming rules, and defines the run configuration that the
//! CLI builds once and threads through every operation.

pub mod backend;
pub mod config;
pub mod error;
pub mod mapping;
pub mod validation;

pub use backend::Backend;
pub use config::{Operation, RunConfig, StoreOptions, SyncPolicy};
pub use error::{Error, Result};
pub use mapping::Mapping;
pub use validation::{ValidationIssue, validate_env_name};
