//! SyncEngine implementation

use std::path::Path;

use envchanter_meta::{Mapping, SyncPolicy};

use super::decision::{SyncInteraction, select};
use super::diff::{Difference, compute_differences};
use crate::envfile::{self, Snapshot};
use crate::store::SecretStore;
use crate::transfer::fetch_remote;
use crate::Result;

/// What a sync pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No mapped variable differs; the env-file was not touched.
    InSync,

    /// Differences existed but none were selected; the env-file was not
    /// touched.
    NothingApplied { differences: usize, cancelled: bool },

    /// Selected remote values were merged and the env-file rewritten.
    Applied {
        /// Names of the updated variables, in name order.
        updated: Vec<String>,
        differences: usize,
        cancelled: bool,
    },
}

impl SyncOutcome {
    /// Number of variables written.
    pub fn updated_count(&self) -> usize {
        match self {
            SyncOutcome::Applied { updated, .. } => updated.len(),
            _ => 0,
        }
    }
}

/// Reconciles one env-file with the remote store for one mapping.
pub struct SyncEngine<'a> {
    mapping: &'a Mapping,
    store: &'a dyn SecretStore,
    env_path: &'a Path,
    always_quote: bool,
}

impl<'a> SyncEngine<'a> {
    pub fn new(mapping: &'a Mapping, store: &'a dyn SecretStore, env_path: &'a Path) -> Self {
        Self {
            mapping,
            store,
            env_path,
            always_quote: false,
        }
    }

    /// Quote every value when rewriting the env-file.
    pub fn with_always_quote(mut self, always_quote: bool) -> Self {
        self.always_quote = always_quote;
        self
    }

    /// Load both sides and compute their differences without changing
    /// anything.
    ///
    /// A missing env-file counts as empty. Remote values that do not exist
    /// are treated as absent.
    pub fn plan(&self) -> Result<(Snapshot, Vec<Difference>)> {
        self.mapping.validate(self.store.backend())?;

        let local = envfile::read_env_file_or_empty(self.env_path)?;
        let (remote, missing) = fetch_remote(self.mapping, self.store)?;
        if !missing.is_empty() {
            tracing::debug!(missing = missing.len(), "mapped variables absent remotely");
        }

        let differences = compute_differences(self.mapping, &local, &remote);
        Ok((local, differences))
    }

    /// Run a full sync pass.
    ///
    /// Differences are shown through `interaction` before any are selected.
    /// Under [`SyncPolicy::Force`] `interaction` is never asked anything.
    pub fn run(
        &self,
        policy: SyncPolicy,
        interaction: &mut dyn SyncInteraction,
    ) -> Result<SyncOutcome> {
        let (mut local, differences) = self.plan()?;

        if differences.is_empty() {
            tracing::info!("env-file in sync with remote store");
            return Ok(SyncOutcome::InSync);
        }

        interaction.show_differences(&differences);
        let selection = select(&differences, policy, interaction)?;
        let accepted = selection.accepted();

        if accepted.is_empty() {
            return Ok(SyncOutcome::NothingApplied {
                differences: differences.len(),
                cancelled: selection.cancelled,
            });
        }

        let mut updated = Vec::with_capacity(accepted.len());
        for idx in accepted {
            let difference = &differences[idx];
            local.insert(difference.name.clone(), difference.remote.clone());
            updated.push(difference.name.clone());
        }

        envfile::write_env_file(self.env_path, &local, self.always_quote)?;
        tracing::info!(updated = updated.len(), "env-file updated from remote store");

        Ok(SyncOutcome::Applied {
            updated,
            differences: differences.len(),
            cancelled: selection.cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::sync::ScriptedInteraction;
    use envchanter_meta::Backend;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn mapping() -> Mapping {
        [("A", "/app/a"), ("B", "/app/b")].into_iter().collect()
    }

    #[test]
    fn test_force_sync_updates_and_inserts() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        fs::write(&env_path, "A=1\n").unwrap();
        let store = MemoryStore::new(Backend::ParameterStore)
            .with_value("/app/a", "2")
            .with_value("/app/b", "9");
        let mapping = mapping();
        let mut interaction = ScriptedInteraction::default();

        let outcome = SyncEngine::new(&mapping, &store, &env_path)
            .run(SyncPolicy::Force, &mut interaction)
            .unwrap();

        assert_eq!(outcome.updated_count(), 2);
        assert_eq!(interaction.shown, vec!["A", "B"]);
        assert_eq!(fs::read_to_string(&env_path).unwrap(), "A=2\nB=9\n");
    }

    #[test]
    fn test_in_sync_does_not_write() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        let original = "# keep me\nA=1\n";
        fs::write(&env_path, original).unwrap();
        let store = MemoryStore::new(Backend::ParameterStore).with_value("/app/a", "1");
        let mapping = mapping();
        let mut interaction = ScriptedInteraction::default();

        let outcome = SyncEngine::new(&mapping, &store, &env_path)
            .run(SyncPolicy::Force, &mut interaction)
            .unwrap();

        assert_eq!(outcome, SyncOutcome::InSync);
        assert!(interaction.shown.is_empty());
        assert_eq!(fs::read_to_string(&env_path).unwrap(), original);
    }

    #[test]
    fn test_interactive_skip_all_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        fs::write(&env_path, "A=1\n").unwrap();
        let store = MemoryStore::new(Backend::ParameterStore)
            .with_value("/app/a", "2")
            .with_value("/app/b", "9");
        let mapping = mapping();
        let mut interaction = ScriptedInteraction::new(["n", "n"]);

        let outcome = SyncEngine::new(&mapping, &store, &env_path)
            .run(SyncPolicy::Interactive, &mut interaction)
            .unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::NothingApplied {
                differences: 2,
                cancelled: false
            }
        );
        assert_eq!(fs::read_to_string(&env_path).unwrap(), "A=1\n");
    }

    #[test]
    fn test_interactive_partial_accept_rewrites_whole_file() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        fs::write(&env_path, "# comment\nLOCAL_ONLY=keep\nA=1\n").unwrap();
        let store = MemoryStore::new(Backend::ParameterStore)
            .with_value("/app/a", "2")
            .with_value("/app/b", "9");
        let mapping = mapping();
        let mut interaction = ScriptedInteraction::new(["n", "y"]);

        let outcome = SyncEngine::new(&mapping, &store, &env_path)
            .with_always_quote(true)
            .run(SyncPolicy::Interactive, &mut interaction)
            .unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Applied {
                updated: vec!["B".to_string()],
                differences: 2,
                cancelled: false,
            }
        );
        assert_eq!(
            fs::read_to_string(&env_path).unwrap(),
            "A=\"1\"\nB=\"9\"\nLOCAL_ONLY=\"keep\"\n"
        );
    }

    #[test]
    fn test_missing_env_file_is_created() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        let store = MemoryStore::new(Backend::ParameterStore).with_value("/app/b", "9");
        let mapping = mapping();
        let mut interaction = ScriptedInteraction::default();

        let outcome = SyncEngine::new(&mapping, &store, &env_path)
            .run(SyncPolicy::Force, &mut interaction)
            .unwrap();

        assert_eq!(outcome.updated_count(), 1);
        assert_eq!(fs::read_to_string(&env_path).unwrap(), "B=9\n");
    }

    #[test]
    fn test_malformed_env_file_fails_before_remote_calls() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        fs::write(&env_path, "A=1\nBROKEN\n").unwrap();
        let store = MemoryStore::new(Backend::ParameterStore).with_value("/app/a", "2");
        let mapping = mapping();

        let err = SyncEngine::new(&mapping, &store, &env_path)
            .run(SyncPolicy::Force, &mut ScriptedInteraction::default())
            .unwrap_err();

        assert!(matches!(err, crate::Error::MalformedEnvFile { line: 2, .. }));
        assert!(store.calls().is_empty());
    }
}
