//! Log store facade
//!
//! The capture engine and the retention pruner only talk to log storage
//! through this trait, so any backend holding rows by owner can serve them.

use crate::error::LoggableResult;
use crate::models::{LogId, LogRecord, NewLogRecord, OwnerRef};

/// Create/query/delete access to persisted log records
pub trait LogStore {
    /// Persist a new record, assigning its id
    fn insert(&self, record: NewLogRecord) -> LoggableResult<LogRecord>;

    /// All records of `owner`, newest first, payloads decoded
    fn list_for(&self, owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>>;

    /// Delete one record; returns `false` if it was already gone
    fn delete(&self, id: LogId) -> LoggableResult<bool>;
}

impl<T: LogStore + ?Sized> LogStore for &T {
    fn insert(&self, record: NewLogRecord) -> LoggableResult<LogRecord> {
        (**self).insert(record)
    }

    fn list_for(&self, owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>> {
        (**self).list_for(owner)
    }

    fn delete(&self, id: LogId) -> LoggableResult<bool> {
        (**self).delete(id)
    }
}
