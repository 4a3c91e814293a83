//! Log record model
//!
//! A log record is one captured change of a tracked entity. It is immutable
//! once persisted; the only way it leaves the store is deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::change_set::ChangeSet;
use super::ids::{ActorId, LogId};
use super::owner::OwnerRef;

/// A persisted log record with its payload already decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store-generated surrogate id
    pub id: LogId,

    /// Entity the change belongs to
    pub owner: OwnerRef,

    /// User who caused the change, if one was authenticated
    pub actor_id: Option<ActorId>,

    /// Storage table of the owning entity
    pub table_name: String,

    /// Changed fields that survived exclusion filtering
    pub payload: ChangeSet,

    /// Free-text reason supplied for this operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// When the change was captured
    pub created_at: DateTime<Utc>,
}

/// A log record ready to be written, payload already encoded as JSON text
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogRecord {
    pub owner: OwnerRef,
    pub actor_id: Option<ActorId>,
    pub table_name: String,
    /// Serialized payload (the `model_logs` column)
    pub model_logs: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewLogRecord {
    /// Create a record for `owner` captured now, with no actor or reason
    pub fn new(
        owner: OwnerRef,
        table_name: impl Into<String>,
        model_logs: impl Into<String>,
    ) -> Self {
        Self {
            owner,
            actor_id: None,
            table_name: table_name.into(),
            model_logs: model_logs.into(),
            reason: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_actor(mut self, actor_id: Option<ActorId>) -> Self {
        self.actor_id = actor_id;
        self
    }

    /// Attach a reason; blank reasons are dropped
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason.filter(|r| !r.trim().is_empty());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
