//! Audit capture for tracked entities
//!
//! Whenever a tracked entity is created or updated, the delta of its changed
//! fields is captured as an immutable log record tagged with the acting
//! user, an optional reason and the owning entity's type and key.
//!
//! # Architecture
//!
//! - [`Auditable`]: capability an entity type implements (type tag, table,
//!   key, excluded fields, retention count).
//! - [`Tracked`]: per-instance wrapper holding the persisted baseline, the
//!   logging flag and the reason.
//! - [`extract_changes`] and [`ExclusionSet`]: dirty-field extraction and
//!   noise filtering.
//! - [`AuditEngine`]: pre-commit and post-commit hooks plus the
//!   log-worthiness predicate.
//! - [`RetentionPruner`]: keep-last-N cleanup per owner.
//! - [`LogStore`]: read/write facade over persisted log records.
//! - [`AuditedStore`]: decorator running the hooks around an
//!   [`EntityStore`] commit.
//!
//! # Example
//!
//! ```rust,ignore
//! use loggable::audit::{AuditEngine, AuditedStore, NoActor, Tracked};
//!
//! let engine = AuditEngine::new(&storage.logs, &NoActor);
//! let invoices = AuditedStore::new(&invoice_repo, engine);
//!
//! let mut invoice = invoice_repo.find(42)?.expect("invoice exists");
//! invoice.status = "sent".into();
//! invoice.set_reason("customer asked for a copy");
//! invoices.save(&mut invoice)?;
//! ```

mod actor;
mod auditable;
mod engine;
mod exclusion;
mod extract;
mod pipeline;
mod pruner;
mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use actor::{ActorProvider, FixedActor, NoActor};
pub use auditable::{Auditable, PendingCapture, Tracked};
pub use engine::{is_log_worthy, AuditEngine};
pub use exclusion::{ExclusionSet, INSERT_DATE_FIELD};
pub use extract::extract_changes;
pub use pipeline::{AuditedStore, EntityStore};
pub use pruner::RetentionPruner;
pub use store::LogStore;
