//! Sync command implementation

use colored::Colorize;

use envchanter_core::{
    Mapping, RunConfig, SecretStore, SyncEngine, SyncInteraction, SyncOutcome, SyncPolicy,
};

use crate::error::Result;

/// Reconcile the env-file with the remote store.
pub fn run_sync(
    config: &RunConfig,
    mapping: &Mapping,
    store: &dyn SecretStore,
    policy: SyncPolicy,
    interaction: &mut dyn SyncInteraction,
) -> Result<()> {
    println!(
        "{} Comparing {} with {} ({})...",
        "=>".blue().bold(),
        config.env_path.display(),
        config.backend.to_string().cyan(),
        policy
    );

    let outcome = SyncEngine::new(mapping, store, &config.env_path)
        .with_always_quote(config.always_quote)
        .run(policy, interaction)?;

    match outcome {
        SyncOutcome::InSync => {
            println!("{} Already in sync. No changes needed.", "OK".green().bold());
        }
        SyncOutcome::NothingApplied { cancelled, .. } => {
            let note = if cancelled { "Cancelled" } else { "Skipped all" };
            println!("{} {}. No changes applied.", "--".yellow().bold(), note);
        }
        SyncOutcome::Applied {
            updated, cancelled, ..
        } => {
            if cancelled {
                println!("   {} Cancelled; earlier selections kept.", "!".yellow());
            }
            println!(
                "{} Updated {} variable(s) in {}",
                "OK".green().bold(),
                updated.len(),
                config.env_path.display()
            );
        }
    }
    Ok(())
}
