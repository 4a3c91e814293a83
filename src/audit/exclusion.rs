//! Exclusion of noise and bookkeeping fields
//!
//! Some columns change on every save (timestamps) or are declared
//! uninteresting by the entity; they never reach a log payload.

use std::collections::BTreeSet;

use super::auditable::Auditable;
use crate::models::ChangeSet;

/// Bookkeeping column excluded from every entity
pub const INSERT_DATE_FIELD: &str = "insert_date";

/// Set of field names that never appear in a log payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    fields: BTreeSet<String>,
}

impl ExclusionSet {
    /// Build the exclusion set from the individual sources
    ///
    /// The set is the union of the configured "do not log" fields, the
    /// updated-at column, [`INSERT_DATE_FIELD`] and, for soft-deleting
    /// entities, the deleted-at column.
    pub fn new<'a>(
        dont_log_fields: impl IntoIterator<Item = &'a str>,
        updated_at_column: Option<&str>,
        deleted_at_column: Option<&str>,
    ) -> Self {
        let mut fields: BTreeSet<String> =
            dont_log_fields.into_iter().map(str::to_string).collect();

        fields.extend(updated_at_column.map(str::to_string));
        fields.insert(INSERT_DATE_FIELD.to_string());
        fields.extend(deleted_at_column.map(str::to_string));

        Self { fields }
    }

    /// Exclusion set declared by an auditable entity
    pub fn for_entity<E: Auditable>(entity: &E) -> Self {
        Self::new(
            entity.dont_log_fields().iter().copied(),
            entity.updated_at_column(),
            entity.deleted_at_column(),
        )
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Copy of `changes` without excluded fields
    pub fn filter(&self, changes: &ChangeSet) -> ChangeSet {
        changes
            .iter()
            .filter(|(key, _)| !self.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Whether at least one field of `changes` survives filtering
    pub fn has_loggable(&self, changes: &ChangeSet) -> bool {
        changes.keys().any(|key| !self.contains(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_union_of_sources() {
        let set = ExclusionSet::new(["secret"], Some("updated_at"), Some("deleted_at"));

        assert!(set.contains("secret"));
        assert!(set.contains("updated_at"));
        assert!(set.contains(INSERT_DATE_FIELD));
        assert!(set.contains("deleted_at"));
        assert!(!set.contains("status"));
    }

    #[test]
    fn test_insert_date_always_excluded() {
        let set = ExclusionSet::new(Vec::<&str>::new(), None, None);
        assert_eq!(set.fields().collect::<Vec<_>>(), vec![INSERT_DATE_FIELD]);
    }

    #[test]
    fn test_filter_keeps_only_loggable_fields() {
        let set = ExclusionSet::new(Vec::<&str>::new(), Some("updated_at"), None);
        let changes = ChangeSet::from_value(json!({
            "status": "sent",
            "updated_at": "2024-01-01T00:00:00Z",
            "insert_date": "2023-12-31"
        }))
        .unwrap();

        let filtered = set.filter(&changes);
        assert_eq!(filtered, ChangeSet::from_value(json!({"status": "sent"})).unwrap());
        assert!(set.has_loggable(&changes));
    }

    #[test]
    fn test_only_excluded_fields_not_loggable() {
        let set = ExclusionSet::new(["status"], Some("updated_at"), None);
        let changes =
            ChangeSet::from_value(json!({"status": "sent", "updated_at": "T1"})).unwrap();

        assert!(!set.has_loggable(&changes));
        assert!(set.filter(&changes).is_empty());
    }
}
