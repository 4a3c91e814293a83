//! Audit capture engine
//!
//! Two hooks bracket the commit of a tracked entity. The pre-commit hook
//! snapshots the dirty fields while the entity still knows them; the
//! post-commit hook decides whether the change is log-worthy and writes the
//! log record. Neither hook ever fails the mutation: every capture-side
//! failure is reported through `tracing` and swallowed.

use tracing::{debug, warn};

use super::actor::ActorProvider;
use super::auditable::{Auditable, PendingCapture, Tracked};
use super::exclusion::ExclusionSet;
use super::pruner::RetentionPruner;
use super::store::LogStore;
use crate::config::AuditSettings;
use crate::error::LoggableResult;
use crate::models::{LogRecord, NewLogRecord, OwnerRef};

/// Decide whether a captured change deserves a log record
///
/// Updates need at least one changed field outside the exclusion set.
/// Creations only need some initial data, even if all of it is excluded.
pub fn is_log_worthy(capture: &PendingCapture, exclusions: &ExclusionSet) -> bool {
    if capture.updating {
        exclusions.has_loggable(&capture.updated_data)
    } else {
        !capture.updated_data.is_empty()
    }
}

/// Orchestrates capture around the commit of tracked entities
pub struct AuditEngine<'a> {
    logs: &'a dyn LogStore,
    actor: &'a dyn ActorProvider,
    auto_prune: bool,
    default_keep: Option<u32>,
}

impl<'a> AuditEngine<'a> {
    /// Create an engine that prunes automatically and has no fallback keep-count
    pub fn new(logs: &'a dyn LogStore, actor: &'a dyn ActorProvider) -> Self {
        Self {
            logs,
            actor,
            auto_prune: true,
            default_keep: None,
        }
    }

    /// Create an engine configured from user settings
    pub fn from_settings(
        logs: &'a dyn LogStore,
        actor: &'a dyn ActorProvider,
        settings: &AuditSettings,
    ) -> Self {
        Self::new(logs, actor)
            .with_auto_prune(settings.auto_prune)
            .with_default_keep(settings.default_keep)
    }

    pub fn with_auto_prune(mut self, auto_prune: bool) -> Self {
        self.auto_prune = auto_prune;
        self
    }

    pub fn with_default_keep(mut self, keep: Option<u32>) -> Self {
        self.default_keep = keep;
        self
    }

    pub fn auto_prune(&self) -> bool {
        self.auto_prune
    }

    /// Log store records are written to
    pub fn logs(&self) -> &'a dyn LogStore {
        self.logs
    }

    /// Effective keep-count for an entity
    pub fn keep_for<E: Auditable>(&self, entity: &E) -> Option<u32> {
        entity.keep_old_logs().or(self.default_keep)
    }

    /// Snapshot the pending change; must run before the store commits
    pub fn pre_commit<E: Auditable>(&self, tracked: &mut Tracked<E>) {
        if !tracked.is_logging_enabled() {
            tracked.set_pending(None);
            return;
        }

        let pending = match tracked.dirty() {
            Ok(updated_data) => Some(PendingCapture {
                updating: tracked.exists(),
                updated_data,
            }),
            Err(e) => {
                warn!(owner_type = E::OWNER_TYPE, error = %e, "Failed to read dirty fields, change will not be logged");
                None
            }
        };

        tracked.set_pending(pending);
    }

    /// Write the log record for a committed change, if it is log-worthy
    ///
    /// Returns the persisted record, or `None` when nothing was logged.
    pub fn post_commit<E: Auditable>(&self, tracked: &mut Tracked<E>) -> Option<LogRecord> {
        let pending = tracked.take_pending();
        let reason = tracked.take_reason();

        if !tracked.is_logging_enabled() {
            return None;
        }
        let pending = pending?;

        let exclusions = ExclusionSet::for_entity(tracked.get());
        if !is_log_worthy(&pending, &exclusions) {
            debug!(owner_type = E::OWNER_TYPE, "No loggable changes");
            return None;
        }

        let Some(owner) = tracked.owner() else {
            warn!(owner_type = E::OWNER_TYPE, "Committed entity has no key, change will not be logged");
            return None;
        };

        let record = match self.build_record::<E>(&owner, &pending, &exclusions, reason) {
            Ok(record) => record,
            Err(e) => {
                warn!(owner = %owner, error = %e, "Failed to serialize log payload");
                return None;
            }
        };

        let stored = match self.logs.insert(record) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(owner = %owner, error = %e, "Failed to write log record");
                return None;
            }
        };
        debug!(owner = %owner, log_id = %stored.id, "Captured change");

        if self.auto_prune {
            if let Some(keep) = self.keep_for(tracked.get()) {
                if let Err(e) = RetentionPruner::new(self.logs).prune(&owner, keep) {
                    warn!(owner = %owner, error = %e, "Failed to prune old log records");
                }
            }
        }

        Some(stored)
    }

    fn build_record<E: Auditable>(
        &self,
        owner: &OwnerRef,
        pending: &PendingCapture,
        exclusions: &ExclusionSet,
        reason: Option<String>,
    ) -> LoggableResult<NewLogRecord> {
        let payload = exclusions.filter(&pending.updated_data);

        Ok(
            NewLogRecord::new(owner.clone(), E::TABLE_NAME, payload.to_json_text()?)
                .with_actor(self.actor.current_actor())
                .with_reason(reason),
        )
    }
}
