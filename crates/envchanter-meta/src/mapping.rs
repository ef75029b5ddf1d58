//! Mapping of local variable names to remote identifiers
//!
//! The mapping file is a flat JSON object:
//!
//! ```json
//! {
//!     "DB_PASSWORD": "/myapp/dev/db-password",
//!     "API_KEY": "/myapp/dev/api-key"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::backend::Backend;
use crate::validation::{ValidationIssue, validate_env_name};
use crate::{Error, Result};

/// Validated association of local variable names to remote identifiers.
///
/// Entries iterate in ascending variable-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    /// Load a mapping from a JSON file.
    ///
    /// Anything other than an object of string values is rejected as
    /// malformed. Content is not validated here; call [`Mapping::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = envchanter_fs::io::read_text(path)?;
        Self::from_json(&content).map_err(|message| Error::MalformedInput {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_json(content: &str) -> std::result::Result<Self, String> {
        let mapping: Self = serde_json::from_str(content)
            .map_err(|e| format!("expected a flat object of string values ({})", e))?;
        tracing::debug!(entries = mapping.len(), "loaded mapping");
        Ok(mapping)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, identifier)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, id)| (name.as_str(), id.as_str()))
    }

    /// Validate every entry, stopping at the first failure.
    pub fn validate(&self, backend: Backend) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyMapping);
        }
        match self.validate_all(backend).into_iter().next() {
            Some(issue) => Err(issue.into_error()),
            None => Ok(()),
        }
    }

    /// Collect every failing entry for per-entry diagnostics.
    pub fn validate_all(&self, backend: Backend) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (name, identifier) in self.iter() {
            if let Err(Error::Validation { field, reason }) = validate_env_name(name) {
                issues.push(ValidationIssue {
                    field,
                    reason,
                    identifier: None,
                });
            }
            if let Err(reason) = backend.validate_identifier(identifier) {
                issues.push(ValidationIssue {
                    field: format!("remote identifier for '{}'", name),
                    reason,
                    identifier: Some(identifier.to_string()),
                });
            }
        }
        issues
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
