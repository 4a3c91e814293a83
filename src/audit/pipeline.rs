//! Commit decoration
//!
//! Capture is wired explicitly: an [`AuditedStore`] wraps any
//! [`EntityStore`] and runs the engine hooks around its commit.

use tracing::warn;

use super::auditable::{Auditable, Tracked};
use super::engine::AuditEngine;
use crate::error::LoggableResult;
use crate::models::LogRecord;

/// Persistence of tracked entities
pub trait EntityStore<E> {
    /// Insert (`exists == false`) or update the entity
    ///
    /// Inserts must assign the entity's key before returning.
    fn commit(&self, entity: &mut E, exists: bool) -> LoggableResult<()>;
}

/// An entity store whose commits are audited
pub struct AuditedStore<'a, S: ?Sized> {
    inner: &'a S,
    engine: AuditEngine<'a>,
}

impl<'a, S: ?Sized> AuditedStore<'a, S> {
    pub fn new(inner: &'a S, engine: AuditEngine<'a>) -> Self {
        Self { inner, engine }
    }

    pub fn engine(&self) -> &AuditEngine<'a> {
        &self.engine
    }

    pub fn inner(&self) -> &'a S {
        self.inner
    }

    /// Commit the entity and capture its change
    ///
    /// Only a failed commit is returned as an error. Once the store has
    /// committed, the instance counts as persisted even if capture or the
    /// baseline refresh fails. The log record, if one was written, is
    /// returned for the caller's convenience.
    pub fn save<E>(&self, tracked: &mut Tracked<E>) -> LoggableResult<Option<LogRecord>>
    where
        E: Auditable,
        S: EntityStore<E>,
    {
        self.engine.pre_commit(tracked);

        let exists = tracked.exists();
        if let Err(e) = self.inner.commit(tracked.get_mut(), exists) {
            tracked.set_pending(None);
            return Err(e);
        }

        tracked.mark_persisted();

        let record = self.engine.post_commit(tracked);
        if let Err(e) = tracked.sync_original() {
            warn!(owner_type = E::OWNER_TYPE, error = %e, "Failed to refresh baseline after commit");
        }

        Ok(record)
    }
}
