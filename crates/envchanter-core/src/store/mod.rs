//! Remote store abstraction
//!
//! Every backend offers the same two calls: fetch a value by identifier and
//! store a value at an identifier. Transfer and sync code is written once
//! against [`SecretStore`] and never sees which backend is active.

#[cfg(any(test, feature = "test-support"))]
mod memory;
mod parameter;
mod vault;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryStore, StoreCall};
pub use parameter::ParameterStore;
pub use vault::SecretVault;

use std::fmt;

use envchanter_meta::{Backend, StoreOptions};

/// Placeholder substituted for identifiers in backend error messages.
pub const REDACTED: &str = "<redacted>";

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a store backend.
///
/// A missing value is not an error; [`SecretStore::fetch`] returns
/// `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the call
    #[error("{message}")]
    Backend { message: String },

    /// The backend client could not be built
    #[error("Remote store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Build a backend error, scrubbing `identifier` out of the message.
    ///
    /// Service errors often quote the resource they failed on.
    pub fn backend(message: impl fmt::Display, identifier: &str) -> Self {
        Self::Backend {
            message: redact(&message.to_string(), identifier),
        }
    }

    pub fn unavailable(message: impl fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }
}

fn redact(message: &str, identifier: &str) -> String {
    if identifier.is_empty() {
        return message.to_string();
    }
    let mut scrubbed = replace_token(message, identifier, REDACTED);
    // Resource ARNs spell parameter paths without the leading slash and
    // prefix secret names with `secret:`.
    if let Some(bare) = identifier.strip_prefix('/')
        && !bare.is_empty()
    {
        scrubbed = replace_token(
            &scrubbed,
            &format!("parameter/{}", bare),
            &format!("parameter/{}", REDACTED),
        );
    }
    scrubbed = scrubbed.replace(
        &format!("secret:{}", identifier),
        &format!("secret:{}", REDACTED),
    );
    scrubbed
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-')
}

/// Replace `needle` only where it is not embedded in a longer identifier
/// or word.
fn replace_token(haystack: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(needle) {
        if start < last {
            continue;
        }
        let end = start + needle.len();
        let left_ok = !haystack[..start]
            .chars()
            .next_back()
            .is_some_and(is_token_char);
        let right_ok = !haystack[end..].chars().next().is_some_and(is_token_char);
        if left_ok && right_ok {
            out.push_str(&haystack[last..start]);
            out.push_str(replacement);
            last = end;
        }
    }
    out.push_str(&haystack[last..]);
    out
}

/// Fetch/store capability over a remote secret store.
///
/// Calls are made one at a time; implementations need no internal
/// concurrency.
pub trait SecretStore {
    /// The backend whose identifier rules apply to this store.
    fn backend(&self) -> Backend;

    /// Fetch the value at `identifier`, or `None` if it does not exist.
    fn fetch(&self, identifier: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite the value at `identifier`.
    fn store(&self, identifier: &str, value: &str) -> StoreResult<()>;
}

/// Build the client for the selected backend.
pub fn open_store(backend: Backend, options: &StoreOptions) -> StoreResult<Box<dyn SecretStore>> {
    tracing::debug!(%backend, profile = ?options.profile, region = ?options.region, "opening remote store");
    let store: Box<dyn SecretStore> = match backend {
        Backend::ParameterStore => Box::new(ParameterStore::connect(options)?),
        Backend::SecretVault => Box::new(SecretVault::connect(options)?),
    };
    Ok(store)
}

/// Current-thread runtime used to drive SDK futures from synchronous code.
fn sdk_runtime() -> StoreResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| StoreError::unavailable(format!("failed creating async runtime: {}", e)))
}

async fn load_sdk_config(options: &StoreOptions) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(profile) = &options.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &options.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    loader.load().await
}
