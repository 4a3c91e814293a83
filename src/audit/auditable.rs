//! The auditable capability and per-instance tracking state
//!
//! Entity types opt into auditing by implementing [`Auditable`]. Each loaded
//! or freshly built instance is wrapped in a [`Tracked`] that remembers the
//! persisted baseline and carries the instance-level logging flag and
//! reason. None of that state is persisted or shared between instances.

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use super::extract::extract_changes;
use super::store::LogStore;
use crate::error::LoggableResult;
use crate::models::{ChangeSet, LogRecord, OwnerId, OwnerRef};

/// Capability implemented by every entity type that wants an audit trail
///
/// Fields are read through the entity's `Serialize` implementation, so the
/// serialized field names are the names that appear in log payloads.
pub trait Auditable: Serialize {
    /// Stable type tag stored as the owner type of log records
    const OWNER_TYPE: &'static str;

    /// Storage table of the entity, denormalized into log records
    const TABLE_NAME: &'static str;

    /// Primary key, `None` until the store has assigned one
    fn key(&self) -> Option<OwnerId>;

    /// Fields that never appear in a log payload
    fn dont_log_fields(&self) -> &[&str] {
        &[]
    }

    /// Column touched on every update
    fn updated_at_column(&self) -> Option<&str> {
        Some("updated_at")
    }

    /// Soft-deletion column, for entities that support soft deletes
    fn deleted_at_column(&self) -> Option<&str> {
        None
    }

    /// Number of log records to keep per instance
    fn keep_old_logs(&self) -> Option<u32> {
        None
    }
}

/// State captured by the pre-commit hook for the post-commit hook
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCapture {
    /// The record existed before this operation
    pub updating: bool,
    /// Raw dirty fields, before exclusion filtering
    pub updated_data: ChangeSet,
}

/// An entity instance together with its audit tracking state
#[derive(Debug, Clone)]
pub struct Tracked<E> {
    entity: E,
    /// Field values at the last load or commit; `None` for new records
    original: Option<ChangeSet>,
    persisted: bool,
    logging_enabled: bool,
    reason: Option<String>,
    pending: Option<PendingCapture>,
}

impl<E: Auditable> Tracked<E> {
    /// Wrap an entity that has never been persisted
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            original: None,
            persisted: false,
            logging_enabled: true,
            reason: None,
            pending: None,
        }
    }

    /// Wrap an entity freshly loaded from its store
    pub fn loaded(entity: E) -> LoggableResult<Self> {
        let original = ChangeSet::from_value(serde_json::to_value(&entity)?)?;
        Ok(Self {
            entity,
            original: Some(original),
            persisted: true,
            logging_enabled: true,
            reason: None,
            pending: None,
        })
    }

    /// Whether the entity existed in its store before the next save
    pub fn exists(&self) -> bool {
        self.persisted
    }

    pub fn get(&self) -> &E {
        &self.entity
    }

    pub fn get_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    pub fn into_inner(self) -> E {
        self.entity
    }

    pub fn enable_logging(&mut self) -> &mut Self {
        self.logging_enabled = true;
        self
    }

    pub fn disable_logging(&mut self) -> &mut Self {
        self.logging_enabled = false;
        self
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Reason attached to the next captured operation only
    pub fn set_reason(&mut self, reason: impl Into<String>) -> &mut Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Reference to this instance as a log owner, once it has a key
    pub fn owner(&self) -> Option<OwnerRef> {
        self.entity
            .key()
            .map(|id| OwnerRef::new(E::OWNER_TYPE, id))
    }

    /// Current field values of the entity
    pub fn attributes(&self) -> LoggableResult<ChangeSet> {
        ChangeSet::from_value(serde_json::to_value(&self.entity)?)
    }

    /// Fields modified relative to the persisted baseline
    pub fn dirty(&self) -> LoggableResult<ChangeSet> {
        Ok(extract_changes(self.original.as_ref(), &self.attributes()?))
    }

    pub fn is_dirty(&self) -> LoggableResult<bool> {
        Ok(!self.dirty()?.is_empty())
    }

    /// Log records of this instance, newest first
    pub fn loggs(&self, store: &dyn LogStore) -> LoggableResult<Vec<LogRecord>> {
        match self.owner() {
            Some(owner) => store.list_for(&owner),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn set_pending(&mut self, pending: Option<PendingCapture>) {
        self.pending = pending;
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingCapture> {
        self.pending.take()
    }

    pub(crate) fn take_reason(&mut self) -> Option<String> {
        self.reason.take()
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Record the current values as the persisted baseline
    pub(crate) fn sync_original(&mut self) -> LoggableResult<()> {
        self.original = Some(self.attributes()?);
        Ok(())
    }
}

impl<E> Deref for Tracked<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.entity
    }
}

impl<E> DerefMut for Tracked<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.entity
    }
}
