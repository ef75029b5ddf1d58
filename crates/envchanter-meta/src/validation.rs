//! Validation for local variable names and mapping entries

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid env name regex"));

/// Check that `name` is a usable environment variable name.
pub fn validate_env_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(
            "variable name",
            "must not be empty",
        ));
    }
    if !ENV_NAME.is_match(name) {
        return Err(Error::validation(
            format!("variable name '{}'", name),
            "must start with a letter or underscore and contain only letters, digits and underscores",
        ));
    }
    Ok(())
}

/// One failed mapping entry.
///
/// `identifier` carries the offending remote identifier for targeted
/// per-entry diagnostics. `Display` leaves it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub reason: String,
    pub identifier: Option<String>,
}

impl ValidationIssue {
    pub fn into_error(self) -> Error {
        Error::Validation {
            field: self.field,
            reason: self.reason,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}
