//! Reconciliation between the env-file and the remote store
//!
//! A sync pass resolves every mapped identifier, compares it with the local
//! snapshot, reports the differences, selects which of them to apply
//! (everything under the force policy, per-entry answers under the
//! interactive policy), and rewrites the env-file with the selected remote
//! values merged in.

mod decision;
mod diff;
mod engine;

pub use decision::{Decision, EntryState, ScriptedInteraction, Selection, SyncInteraction, select};
pub use diff::{Difference, compute_differences};
pub use engine::{SyncEngine, SyncOutcome};
