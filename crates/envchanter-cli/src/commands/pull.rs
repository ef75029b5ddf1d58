//! Pull command implementation

use colored::Colorize;

use envchanter_core::{Mapping, RunConfig, SecretStore, transfer};

use crate::error::Result;

/// Fetch every mapped value and rewrite the env-file with them.
pub fn run_pull(config: &RunConfig, mapping: &Mapping, store: &dyn SecretStore) -> Result<()> {
    println!(
        "{} Pulling {} parameter(s) from {}...",
        "=>".blue().bold(),
        mapping.len(),
        config.backend.to_string().cyan()
    );

    let report = transfer::pull(mapping, store, &config.env_path, config.always_quote)?;

    if !report.missing.is_empty() {
        println!(
            "   {} {} not found remotely: {}",
            "!".yellow(),
            report.missing.len(),
            report.missing.join(", ").dimmed()
        );
    }
    println!(
        "{} Successfully generated {} with {} parameters",
        "OK".green().bold(),
        config.env_path.display(),
        report.written
    );
    Ok(())
}
