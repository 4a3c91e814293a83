//! Polymorphic owner reference
//!
//! A log record points at its owning entity through a `{type, id}` pair
//! rather than a typed foreign key, so one table can hold the history of
//! every tracked entity type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::OwnerId;
use crate::error::LoggableError;

/// Discriminated reference to the entity a log record belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Stable type tag of the tracked entity (e.g. `Invoice`)
    pub owner_type: String,
    /// Primary key of the tracked entity instance
    pub owner_id: OwnerId,
}

impl OwnerRef {
    pub fn new(owner_type: impl Into<String>, owner_id: impl Into<OwnerId>) -> Self {
        Self {
            owner_type: owner_type.into(),
            owner_id: owner_id.into(),
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner_type, self.owner_id)
    }
}

impl FromStr for OwnerRef {
    type Err = LoggableError;

    /// Parse the `Type#id` form used on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner_type, owner_id) = s.trim().split_once('#').ok_or_else(|| {
            LoggableError::Validation(format!("Owner must look like Type#id, got '{}'", s))
        })?;

        let owner_type = owner_type.trim();
        let owner_id = owner_id.trim();
        if owner_type.is_empty() || owner_id.is_empty() {
            return Err(LoggableError::Validation(format!(
                "Owner type and id cannot be empty: '{}'",
                s
            )));
        }

        Ok(Self::new(owner_type, owner_id))
    }
}
