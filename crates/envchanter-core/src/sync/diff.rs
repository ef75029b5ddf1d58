//! Difference computation

use envchanter_meta::Mapping;

use crate::envfile::Snapshot;

/// One mapped variable whose local state disagrees with the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub name: String,
    pub identifier: String,
    /// `None` when the variable is not set locally.
    pub local: Option<String>,
    pub remote: String,
}

/// Compare the local and remote snapshots for every mapped variable.
///
/// - set on both sides with equal values: no difference
/// - missing locally, present remotely: difference with `local: None`
/// - present locally, missing remotely: no difference, the remote side does
///   not own keys it never defined
/// - set on both sides with different values: difference
///
/// The result is sorted by variable name.
pub fn compute_differences(
    mapping: &Mapping,
    local: &Snapshot,
    remote: &Snapshot,
) -> Vec<Difference> {
    let mut differences: Vec<Difference> = mapping
        .iter()
        .filter_map(|(name, identifier)| {
            let remote_value = remote.get(name)?;
            let local_value = local.get(name);
            if local_value == Some(remote_value) {
                return None;
            }
            Some(Difference {
                name: name.to_string(),
                identifier: identifier.to_string(),
                local: local_value.cloned(),
                remote: remote_value.clone(),
            })
        })
        .collect();

    differences.sort_by(|a, b| a.name.cmp(&b.name));
    differences
}
