//! One-directional transfers between the env-file and the remote store
//!
//! Every operation validates its inputs before the first remote call, so a
//! bad mapping never causes partial remote side effects. Remote calls are
//! made one entry at a time in mapping order.

use std::path::Path;

use envchanter_meta::{Mapping, validate_env_name};

use crate::envfile::{self, Snapshot};
use crate::store::SecretStore;
use crate::{Error, Result};

/// Outcome of a pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullReport {
    /// Number of variables written to the env-file.
    pub written: usize,
    /// Variables whose identifier had no remote value.
    pub missing: Vec<String>,
}

/// Outcome of a bulk push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Variables stored remotely, in mapping order.
    pub pushed: Vec<String>,
    /// Mapped variables absent from the env-file.
    pub skipped: Vec<String>,
}

/// Resolve every mapped identifier.
///
/// Returns the values that exist and the names whose identifier was not
/// found. Any other store failure aborts with [`Error::Fetch`].
pub fn fetch_remote(mapping: &Mapping, store: &dyn SecretStore) -> Result<(Snapshot, Vec<String>)> {
    let mut remote = Snapshot::new();
    let mut missing = Vec::new();

    for (name, identifier) in mapping.iter() {
        tracing::debug!(name, "fetching remote value");
        match store.fetch(identifier) {
            Ok(Some(value)) => {
                remote.insert(name.to_string(), value);
            }
            Ok(None) => {
                tracing::warn!(name, "parameter not found, skipping");
                missing.push(name.to_string());
            }
            Err(source) => {
                return Err(Error::Fetch {
                    name: name.to_string(),
                    source,
                });
            }
        }
    }

    Ok((remote, missing))
}

/// Fetch every mapped value and write the found ones to `env_path`.
///
/// The file is replaced as a whole and left readable by the owner only.
pub fn pull(
    mapping: &Mapping,
    store: &dyn SecretStore,
    env_path: &Path,
    always_quote: bool,
) -> Result<PullReport> {
    mapping.validate(store.backend())?;

    let (remote, missing) = fetch_remote(mapping, store)?;
    envfile::write_env_file(env_path, &remote, always_quote)?;

    tracing::info!(written = remote.len(), missing = missing.len(), "pull complete");
    Ok(PullReport {
        written: remote.len(),
        missing,
    })
}

/// Store every mapped variable present in `local`.
///
/// Mapped variables missing from `local` are skipped without a store call.
/// The first failure aborts the rest; writes already made stay applied.
pub fn push_snapshot(
    mapping: &Mapping,
    store: &dyn SecretStore,
    local: &Snapshot,
) -> Result<PushReport> {
    mapping.validate(store.backend())?;

    let mut report = PushReport::default();
    for (name, identifier) in mapping.iter() {
        let Some(value) = local.get(name) else {
            tracing::debug!(name, "not in env-file, skipping");
            report.skipped.push(name.to_string());
            continue;
        };

        tracing::debug!(name, "storing remote value");
        store
            .store(identifier, value)
            .map_err(|source| Error::PushAborted {
                name: name.to_string(),
                pushed: report.pushed.len(),
                source,
            })?;
        report.pushed.push(name.to_string());
    }

    tracing::info!(
        pushed = report.pushed.len(),
        skipped = report.skipped.len(),
        "push complete"
    );
    Ok(report)
}

/// Read `env_path` and push it according to `mapping`.
pub fn push_file(mapping: &Mapping, store: &dyn SecretStore, env_path: &Path) -> Result<PushReport> {
    // Validate before touching the file so a bad mapping is reported first.
    mapping.validate(store.backend())?;
    let local = envfile::read_env_file(env_path)?;
    push_snapshot(mapping, store, &local)
}

/// Validate one name/identifier pair and store the value.
pub fn push_single(
    store: &dyn SecretStore,
    name: &str,
    value: &str,
    identifier: &str,
) -> Result<()> {
    validate_env_name(name)?;
    store
        .backend()
        .validate_identifier(identifier)
        .map_err(|reason| {
            envchanter_meta::Error::validation(format!("remote identifier for '{}'", name), reason)
        })?;

    store.store(identifier, value).map_err(|source| Error::Store {
        name: name.to_string(),
        source,
    })?;
    tracing::info!(name, "pushed single value");
    Ok(())
}
