//! Interactive prompts for sync
//!
//! Uses dialoguer for per-difference decisions.

use std::io::ErrorKind;

use colored::Colorize;
use dialoguer::Input;

use envchanter_core::envfile::escape_value;
use envchanter_core::{Difference, SyncInteraction};

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalInteraction;

impl TerminalInteraction {
    pub fn new() -> Self {
        Self
    }
}

/// One-line rendering of a value; control characters are shown escaped.
fn shown(value: &str) -> String {
    format!("\"{}\"", escape_value(value))
}

/// Map a prompt result to an answer. Input that is not a terminal, or that
/// has been closed, yields `None`, which the selection treats as cancel.
fn answer_from(
    result: std::result::Result<String, dialoguer::Error>,
) -> envchanter_core::Result<Option<String>> {
    match result {
        Ok(answer) => Ok(Some(answer)),
        Err(dialoguer::Error::IO(e))
            if matches!(e.kind(), ErrorKind::NotConnected | ErrorKind::UnexpectedEof) =>
        {
            tracing::debug!(error = %e, "decision input unavailable, cancelling");
            Ok(None)
        }
        Err(e) => Err(envchanter_core::Error::Decision {
            message: e.to_string(),
        }),
    }
}

impl SyncInteraction for TerminalInteraction {
    fn show_differences(&mut self, differences: &[Difference]) {
        println!();
        println!(
            "{} {} difference(s) found:",
            "DIFF".yellow().bold(),
            differences.len()
        );
        for difference in differences {
            println!(
                "   {} {} ({})",
                "~".yellow(),
                difference.name.cyan(),
                difference.identifier.dimmed()
            );
            match &difference.local {
                Some(local) => println!("       local:  {}", shown(local).red()),
                None => println!("       local:  {}", "<not set>".dimmed()),
            }
            println!("       remote: {}", shown(&difference.remote).green());
        }
        println!();
    }

    fn ask(
        &mut self,
        difference: &Difference,
        position: usize,
        total: usize,
    ) -> envchanter_core::Result<Option<String>> {
        let prompt = format!(
            "[{}/{}] Update {} from remote? [y]es/[n]o/[a]ll/[c]ancel",
            position, total, difference.name
        );

        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        answer_from(answer)
    }

    fn rejected(&mut self, answer: &str, _reason: &str) {
        eprintln!(
            "   {} '{}' not understood; answer y, n, a or c",
            "!".red(),
            answer
        );
    }
}
