//! Core data models for loggable
//!
//! Identifiers, the polymorphic owner reference, change sets and the log
//! record itself.

pub mod change_set;
pub mod ids;
pub mod log_record;
pub mod owner;

pub use change_set::ChangeSet;
pub use ids::{ActorId, LogId, OwnerId};
pub use log_record::{LogRecord, NewLogRecord};
pub use owner::OwnerRef;
