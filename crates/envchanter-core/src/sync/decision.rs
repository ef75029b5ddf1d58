//! Selection of differences to apply
//!
//! Under the interactive policy each difference moves through a small state
//! machine:
//!
//! ```text
//! Pending --yes-->    Accepted
//! Pending --no-->     Skipped
//! Pending --all-->    Accepted, and every later Pending becomes Accepted
//! Pending --cancel--> Skipped,  and every later Pending becomes Skipped
//! ```
//!
//! Unrecognised input leaves the current entry Pending and asks again.

use std::collections::VecDeque;
use std::str::FromStr;

use envchanter_meta::SyncPolicy;

use super::diff::Difference;
use crate::Result;

/// Answer to a per-difference prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Apply this difference.
    Yes,
    /// Leave this variable alone.
    No,
    /// Apply this and every remaining difference.
    All,
    /// Stop; apply nothing further.
    Cancel,
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Decision::Yes),
            "n" | "no" => Ok(Decision::No),
            "a" | "all" => Ok(Decision::All),
            "c" | "cancel" | "q" | "quit" => Ok(Decision::Cancel),
            other => Err(format!("unrecognised answer '{}'", other)),
        }
    }
}

/// Per-difference state during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Accepted,
    Skipped,
}

/// The user-facing side of a sync pass.
///
/// The engine reports the differences through `show_differences` before any
/// decision is taken, then (interactive policy only) asks about each one via
/// `ask`. `ask` returns the raw answer; `None` means input is closed and is
/// treated as cancel.
pub trait SyncInteraction {
    fn show_differences(&mut self, differences: &[Difference]);

    fn ask(&mut self, difference: &Difference, position: usize, total: usize)
    -> Result<Option<String>>;

    /// Called when an answer could not be understood, before asking again.
    fn rejected(&mut self, _answer: &str, _reason: &str) {}
}

/// Result of a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub states: Vec<EntryState>,
    /// True if the pass ended on a cancel.
    pub cancelled: bool,
}

impl Selection {
    /// Indices of accepted differences, in order.
    pub fn accepted(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == EntryState::Accepted)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Choose which differences to apply under `policy`.
pub fn select(
    differences: &[Difference],
    policy: SyncPolicy,
    interaction: &mut dyn SyncInteraction,
) -> Result<Selection> {
    let mut states = vec![EntryState::Pending; differences.len()];

    if policy == SyncPolicy::Force {
        states.fill(EntryState::Accepted);
        return Ok(Selection {
            states,
            cancelled: false,
        });
    }

    let total = differences.len();
    let mut idx = 0;
    while idx < total {
        let Some(answer) = interaction.ask(&differences[idx], idx + 1, total)? else {
            tracing::debug!("decision input closed, cancelling");
            states[idx..].fill(EntryState::Skipped);
            return Ok(Selection {
                states,
                cancelled: true,
            });
        };

        let decision = match answer.parse::<Decision>() {
            Ok(decision) => decision,
            Err(reason) => {
                interaction.rejected(&answer, &reason);
                continue;
            }
        };

        match decision {
            Decision::Yes => states[idx] = EntryState::Accepted,
            Decision::No => states[idx] = EntryState::Skipped,
            Decision::All => {
                states[idx..].fill(EntryState::Accepted);
                break;
            }
            Decision::Cancel => {
                states[idx..].fill(EntryState::Skipped);
                return Ok(Selection {
                    states,
                    cancelled: true,
                });
            }
        }
        idx += 1;
    }

    Ok(Selection {
        states,
        cancelled: false,
    })
}

/// Interaction driven by a fixed list of answers.
///
/// Records what it was shown and asked so tests can assert on it. Running
/// out of answers behaves like closed input.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    /// Names passed to `show_differences`, in order.
    pub shown: Vec<String>,
    /// Names asked about, one entry per prompt (repeats included).
    pub asked: Vec<String>,
    /// Answers that were rejected.
    pub rejected: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl SyncInteraction for ScriptedInteraction {
    fn show_differences(&mut self, differences: &[Difference]) {
        self.shown = differences.iter().map(|d| d.name.clone()).collect();
    }

    fn ask(
        &mut self,
        difference: &Difference,
        _position: usize,
        _total: usize,
    ) -> Result<Option<String>> {
        self.asked.push(difference.name.clone());
        Ok(self.answers.pop_front())
    }

    fn rejected(&mut self, answer: &str, _reason: &str) {
        self.rejected.push(answer.to_string());
    }
}
