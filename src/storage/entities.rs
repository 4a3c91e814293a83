//! Generic entity repository for JSON storage
//!
//! A minimal home for tracked entities keyed by a `u64` sequence. It
//! implements [`EntityStore`] so it can be wrapped in an
//! [`AuditedStore`](crate::audit::AuditedStore).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::audit::{Auditable, EntityStore, Tracked};
use crate::error::{LoggableError, LoggableResult};

use super::file_io::{read_json, write_json_atomic};

/// Entities with a store-assigned integer key
pub trait Sequenced {
    fn id(&self) -> Option<u64>;
    fn assign_id(&mut self, id: u64);
}

/// Serializable entity table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntityTable<E> {
    #[serde(default)]
    sequence: u64,
    rows: Vec<E>,
}

impl<E> Default for EntityTable<E> {
    fn default() -> Self {
        Self {
            sequence: 0,
            rows: Vec::new(),
        }
    }
}

struct EntityState<E> {
    sequence: u64,
    rows: BTreeMap<u64, E>,
}

/// Repository for one entity type
pub struct EntityRepository<E> {
    path: PathBuf,
    data: RwLock<EntityState<E>>,
}

impl<E> EntityRepository<E>
where
    E: Auditable + Sequenced + Serialize + DeserializeOwned + Clone,
{
    /// Create a new entity repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(EntityState {
                sequence: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Load entities from disk
    pub fn load(&self) -> Result<(), LoggableError> {
        let table: EntityTable<E> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.rows.clear();
        let mut highest = table.sequence;
        for entity in table.rows {
            let id = entity.id().ok_or_else(|| {
                LoggableError::Storage(format!("{} row without key in {}", E::OWNER_TYPE, self.path.display()))
            })?;
            highest = highest.max(id);
            data.rows.insert(id, entity);
        }
        data.sequence = highest;

        Ok(())
    }

    fn persist(&self, data: &EntityState<E>) -> Result<(), LoggableError> {
        let table = EntityTable {
            sequence: data.sequence,
            rows: data.rows.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &table)
    }

    /// Load one entity, ready for tracked modification
    pub fn find(&self, id: u64) -> LoggableResult<Option<Tracked<E>>> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        data.rows.get(&id).cloned().map(Tracked::loaded).transpose()
    }

    /// Get all entities in key order
    pub fn get_all(&self) -> LoggableResult<Vec<E>> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.rows.values().cloned().collect())
    }

    /// Delete an entity; its log records are left in place
    pub fn delete(&self, id: u64) -> LoggableResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(removed) = data.rows.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&data) {
            data.rows.insert(id, removed);
            return Err(e);
        }
        Ok(true)
    }
}

impl<E> EntityStore<E> for EntityRepository<E>
where
    E: Auditable + Sequenced + Serialize + DeserializeOwned + Clone,
{
    fn commit(&self, entity: &mut E, exists: bool) -> LoggableResult<()> {
        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let (id, previous) = if exists {
            let id = entity.id().ok_or_else(|| {
                LoggableError::Validation(format!("Cannot update {} without a key", E::OWNER_TYPE))
            })?;
            let previous = data
                .rows
                .get(&id)
                .cloned()
                .ok_or_else(|| LoggableError::entity_not_found(E::OWNER_TYPE, id.to_string()))?;
            (id, Some(previous))
        } else {
            (data.sequence + 1, None)
        };

        // The caller's entity only receives its key once the table is on disk
        let mut row = entity.clone();
        if !exists {
            row.assign_id(id);
        }

        let previous_sequence = data.sequence;
        data.sequence = data.sequence.max(id);
        data.rows.insert(id, row);

        if let Err(e) = self.persist(&data) {
            data.sequence = previous_sequence;
            match previous {
                Some(previous) => data.rows.insert(id, previous),
                None => data.rows.remove(&id),
            };
            return Err(e);
        }

        if !exists {
            entity.assign_id(id);
        }
        Ok(())
    }
}
