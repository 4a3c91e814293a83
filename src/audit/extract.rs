//! Change set extraction
//!
//! Computes the fields of a tracked entity that are dirty relative to its
//! persisted baseline. Extraction is a pure read; exclusion filtering is
//! applied later, when the log record is built.

use serde_json::Value;

use crate::models::ChangeSet;

/// Compute the dirty fields of `current` against the `prior` snapshot
///
/// With no prior snapshot the entity has never been persisted: every field
/// that carries a value is dirty, while `null` fields count as unset.
/// With a snapshot, a field is dirty when its value differs from the
/// snapshot; a field missing from `current` is reported as `null`.
pub fn extract_changes(prior: Option<&ChangeSet>, current: &ChangeSet) -> ChangeSet {
    let Some(prior) = prior else {
        return current
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    };

    let mut changes = ChangeSet::new();

    for (key, after) in current.iter() {
        match prior.get(key) {
            Some(before) if before == after => {}
            _ => {
                changes.insert(key.clone(), after.clone());
            }
        }
    }

    for key in prior.keys() {
        if !current.contains(key) {
            changes.insert(key.clone(), Value::Null);
        }
    }

    changes
}
