//! Command implementations
//!
//! Everything that can fail without touching the network (argument
//! checks, mapping load and validation) runs before the store is opened.

pub mod pull;
pub mod push;
pub mod sync;

use std::path::Path;

use colored::Colorize;
use envchanter_core::{Mapping, RunConfig, SecretStore, open_store};
use envchanter_meta::{Backend, Operation, validate_env_name};

use crate::error::{CliError, Result};
use crate::interactive::TerminalInteraction;

pub use pull::run_pull;
pub use push::{run_push_file, run_push_single};
pub use sync::run_sync;

/// Run the configured operation against the real remote store.
pub fn execute(config: &RunConfig) -> Result<()> {
    let mapping = match (&config.mapping_path, config.operation.needs_mapping()) {
        (Some(path), true) => Some(load_mapping(path, config.backend)?),
        _ => None,
    };

    if let Operation::PushSingle {
        name, identifier, ..
    } = &config.operation
    {
        check_single(name, identifier, config.backend)?;
    }

    let store = open_store(config.backend, &config.store)
        .map_err(envchanter_core::Error::StoreSetup)?;
    dispatch(config, mapping.as_ref(), store.as_ref())
}

/// Run the configured operation against an already opened store.
pub fn dispatch(
    config: &RunConfig,
    mapping: Option<&Mapping>,
    store: &dyn SecretStore,
) -> Result<()> {
    let require = || mapping.ok_or_else(|| CliError::user("--map is required for this operation"));

    match &config.operation {
        Operation::Pull => run_pull(config, require()?, store),
        Operation::PushFile => run_push_file(config, require()?, store),
        Operation::PushSingle {
            name,
            value,
            identifier,
        } => run_push_single(store, name, value, identifier),
        Operation::Sync(policy) => {
            run_sync(config, require()?, store, *policy, &mut TerminalInteraction::new())
        }
    }
}

/// Load the mapping and reject it if any entry is invalid for `backend`.
///
/// Every problem is reported on stderr; the returned error names only the
/// first one.
pub fn load_mapping(path: &Path, backend: Backend) -> Result<Mapping> {
    let mapping = Mapping::load(path)?;

    for issue in mapping.validate_all(backend) {
        tracing::debug!(field = %issue.field, identifier = ?issue.identifier, "mapping entry rejected");
        eprintln!("   {} {}", "!".red(), issue);
    }
    mapping.validate(backend)?;

    tracing::debug!(entries = mapping.len(), path = %path.display(), "mapping loaded");
    Ok(mapping)
}

fn check_single(name: &str, identifier: &str, backend: Backend) -> Result<()> {
    validate_env_name(name)?;
    backend.validate_identifier(identifier).map_err(|reason| {
        envchanter_meta::Error::validation(format!("remote identifier for '{}'", name), reason)
    })?;
    Ok(())
}
