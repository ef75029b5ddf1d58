//! Remote backend selection and identifier rules

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Maximum length of a path-style identifier.
pub const MAX_PATH_IDENTIFIER_LEN: usize = 2048;

/// Maximum length of a name-style identifier.
pub const MAX_NAME_IDENTIFIER_LEN: usize = 127;

static PATH_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[A-Za-z0-9/_.\-]*$").expect("valid path identifier regex"));

static NAME_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-]+$").expect("valid name identifier regex"));

/// The remote store a run talks to.
///
/// Both backends expose the same fetch/store capability and differ only in
/// how identifiers are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Path-addressed parameter service, e.g. `/myapp/dev/db-password`.
    #[default]
    ParameterStore,

    /// Name-addressed secret vault, e.g. `myapp-dev-db-password`.
    SecretVault,
}

impl Backend {
    /// Check an identifier against this backend's naming rule.
    ///
    /// The returned reason never contains the identifier itself.
    pub fn validate_identifier(&self, identifier: &str) -> std::result::Result<(), String> {
        match self {
            Backend::ParameterStore => {
                if !identifier.starts_with('/') {
                    return Err("parameter path must start with '/'".to_string());
                }
                if identifier.len() > MAX_PATH_IDENTIFIER_LEN {
                    return Err(format!(
                        "parameter path exceeds {} characters",
                        MAX_PATH_IDENTIFIER_LEN
                    ));
                }
                if !PATH_IDENTIFIER.is_match(identifier) {
                    return Err(
                        "parameter path may only contain letters, digits, '/', '_', '.' and '-'"
                            .to_string(),
                    );
                }
                Ok(())
            }
            Backend::SecretVault => {
                if identifier.is_empty() {
                    return Err("secret name must not be empty".to_string());
                }
                if identifier.len() > MAX_NAME_IDENTIFIER_LEN {
                    return Err(format!(
                        "secret name exceeds {} characters",
                        MAX_NAME_IDENTIFIER_LEN
                    ));
                }
                if !NAME_IDENTIFIER.is_match(identifier) {
                    return Err(
                        "secret name may only contain letters, digits and '-'".to_string(),
                    );
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parameter-store" | "ssm" | "path" => Ok(Backend::ParameterStore),
            "secret-vault" | "secrets-manager" | "name" => Ok(Backend::SecretVault),
            _ => Err(Error::InvalidBackend {
                backend: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::ParameterStore => write!(f, "parameter-store"),
            Backend::SecretVault => write!(f, "secret-vault"),
        }
    }
}
