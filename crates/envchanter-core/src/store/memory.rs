//! In-memory store
//!
//! Keeps values in a map, records every call, and can be told to fail on
//! chosen identifiers. Used to exercise transfer and sync without a network.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use envchanter_meta::Backend;

use super::{SecretStore, StoreError, StoreResult};

/// One recorded call against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch(String),
    Store(String, String),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    backend: Backend,
    values: RefCell<BTreeMap<String, String>>,
    calls: RefCell<Vec<StoreCall>>,
    failing: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    /// Seed a value.
    pub fn with_value(self, identifier: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .borrow_mut()
            .insert(identifier.into(), value.into());
        self
    }

    /// Make every call on `identifier` fail with a backend error.
    pub fn failing_on(mut self, identifier: impl Into<String>) -> Self {
        self.failing.insert(identifier.into());
        self
    }

    /// Current value at `identifier`.
    pub fn value(&self, identifier: &str) -> Option<String> {
        self.values.borrow().get(identifier).cloned()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Identifiers written so far, in order.
    pub fn stored_identifiers(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Store(id, _) => Some(id.clone()),
                StoreCall::Fetch(_) => None,
            })
            .collect()
    }

    fn check_failure(&self, identifier: &str) -> StoreResult<()> {
        if self.failing.contains(identifier) {
            return Err(StoreError::backend(
                format!("simulated failure for {}", identifier),
                identifier,
            ));
        }
        Ok(())
    }
}

impl SecretStore for MemoryStore {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn fetch(&self, identifier: &str) -> StoreResult<Option<String>> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Fetch(identifier.to_string()));
        self.check_failure(identifier)?;
        Ok(self.value(identifier))
    }

    fn store(&self, identifier: &str, value: &str) -> StoreResult<()> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Store(identifier.to_string(), value.to_string()));
        self.check_failure(identifier)?;
        self.values
            .borrow_mut()
            .insert(identifier.to_string(), value.to_string());
        Ok(())
    }
}
