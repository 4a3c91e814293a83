//! Retention pruning
//!
//! Keeps only the newest N log records of an owner. Pruning is advisory
//! cleanup: two pruners racing on the same owner may both try to delete a
//! record, and a record that is already gone is simply skipped.

use tracing::info;

use super::auditable::{Auditable, Tracked};
use super::store::LogStore;
use crate::error::LoggableResult;
use crate::models::{LogId, OwnerRef};

/// Deletes log records beyond a keep-count
pub struct RetentionPruner<'a> {
    logs: &'a dyn LogStore,
}

impl<'a> RetentionPruner<'a> {
    pub fn new(logs: &'a dyn LogStore) -> Self {
        Self { logs }
    }

    /// Delete every record of `owner` except the `keep` newest
    ///
    /// A keep-count of zero disables pruning. Returns the ids actually
    /// deleted.
    pub fn prune(&self, owner: &OwnerRef, keep: u32) -> LoggableResult<Vec<LogId>> {
        if keep == 0 {
            return Ok(Vec::new());
        }

        let records = self.logs.list_for(owner)?;
        let mut deleted = Vec::new();

        for record in records.into_iter().skip(keep as usize) {
            if self.logs.delete(record.id)? {
                deleted.push(record.id);
            }
        }

        if !deleted.is_empty() {
            info!(owner = %owner, deleted = deleted.len(), keep, "Pruned old log records");
        }

        Ok(deleted)
    }

    /// Prune the records of a tracked instance; no-op before it has a key
    pub fn prune_entity<E: Auditable>(
        &self,
        tracked: &Tracked<E>,
        keep: u32,
    ) -> LoggableResult<Vec<LogId>> {
        match tracked.owner() {
            Some(owner) => self.prune(&owner, keep),
            None => Ok(Vec::new()),
        }
    }
}
