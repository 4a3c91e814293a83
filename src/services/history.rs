//! History service
//!
//! Read access to the captured change history plus on-demand retention.

use crate::audit::{LogStore, RetentionPruner};
use crate::error::{LoggableError, LoggableResult};
use crate::models::{LogId, LogRecord, OwnerRef};
use crate::storage::Storage;

/// Summary of one owner's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub owner: OwnerRef,
    pub record_count: usize,
}

/// Service for browsing and pruning log records
pub struct HistoryService<'a> {
    storage: &'a Storage,
}

impl<'a> HistoryService<'a> {
    /// Create a new history service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All records of an owner, newest first
    pub fn list(&self, owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>> {
        self.storage.logs.list_for(owner)
    }

    /// The `limit` newest records of an owner
    pub fn recent(&self, owner: &OwnerRef, limit: usize) -> LoggableResult<Vec<LogRecord>> {
        let mut records = self.list(owner)?;
        records.truncate(limit);
        Ok(records)
    }

    /// Get a single record by id
    pub fn show(&self, id: LogId) -> LoggableResult<LogRecord> {
        self.storage
            .logs
            .get(id)?
            .ok_or_else(|| LoggableError::log_not_found(id.to_string()))
    }

    /// Every owner that has history, in owner order
    pub fn owners(&self) -> LoggableResult<Vec<OwnerSummary>> {
        Ok(self
            .storage
            .logs
            .owners()?
            .into_iter()
            .map(|(owner, record_count)| OwnerSummary {
                owner,
                record_count,
            })
            .collect())
    }

    /// Keep only the `keep` newest records of an owner
    pub fn prune(&self, owner: &OwnerRef, keep: u32) -> LoggableResult<Vec<LogId>> {
        if keep == 0 {
            return Err(LoggableError::Validation(
                "Keep count must be at least 1".into(),
            ));
        }

        RetentionPruner::new(&self.storage.logs).prune(owner, keep)
    }
}
