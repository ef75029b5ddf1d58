//! Push command implementations

use colored::Colorize;

use envchanter_core::{Mapping, RunConfig, SecretStore, transfer};

use crate::error::Result;

/// Push every mapped variable present in the env-file.
pub fn run_push_file(config: &RunConfig, mapping: &Mapping, store: &dyn SecretStore) -> Result<()> {
    println!(
        "{} Pushing {} to {}...",
        "=>".blue().bold(),
        config.env_path.display(),
        config.backend.to_string().cyan()
    );

    let report = transfer::push_file(mapping, store, &config.env_path)?;

    for name in &report.skipped {
        println!("   {} {} not set locally, skipped", "-".yellow(), name.cyan());
    }
    println!(
        "{} Successfully pushed {} parameters",
        "OK".green().bold(),
        report.pushed.len()
    );
    Ok(())
}

/// Push one value given on the command line.
pub fn run_push_single(
    store: &dyn SecretStore,
    name: &str,
    value: &str,
    identifier: &str,
) -> Result<()> {
    transfer::push_single(store, name, value, identifier)?;

    println!(
        "{} Successfully pushed {} to {}",
        "OK".green().bold(),
        name.cyan(),
        identifier
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envchanter_core::Backend;
    use envchanter_meta::Operation;
    use envchanter_test_utils::{MemoryStore, TestWorkspace};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_push_file() {
        let ws = TestWorkspace::new()
            .with_mapping(&[("A", "/app/a"), ("B", "/app/b")])
            .with_env("A=\"has space\"\nOTHER=x\n");
        let mapping = Mapping::load(&ws.mapping_path()).unwrap();
        let store = MemoryStore::new(Backend::ParameterStore);
        let config = RunConfig::new(Operation::PushFile).with_env_path(ws.env_path());

        run_push_file(&config, &mapping, &store).unwrap();

        assert_eq!(store.stored_identifiers(), vec!["/app/a"]);
        assert_eq!(store.value("/app/a").as_deref(), Some("has space"));
    }

    #[test]
    fn test_run_push_single_invalid_name_makes_no_call() {
        let store = MemoryStore::new(Backend::ParameterStore);
        assert!(run_push_single(&store, "BAD-NAME", "v", "/app/x").is_err());
        assert!(store.calls().is_empty());
    }
}
