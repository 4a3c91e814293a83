//! Log record repository for JSON storage
//!
//! Manages the `models_logs.json` table. Rows keep the column layout of the
//! relational schema (`loggable_type`, `loggable_id`, `user_id`,
//! `model_logs` as JSON text, ...) so a table dump can be bulk-loaded into
//! a database unchanged.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::LogStore;
use crate::error::{LoggableError, LoggableResult};
use crate::models::{ActorId, ChangeSet, LogId, LogRecord, NewLogRecord, OwnerId, OwnerRef};

use super::file_io::{read_json, write_json_atomic};

/// One persisted row of the log table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogRow {
    id: LogId,
    loggable_id: OwnerId,
    loggable_type: String,
    user_id: Option<ActorId>,
    table_name: String,
    model_logs: String,
    #[serde(default)]
    reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl LogRow {
    fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.loggable_type.clone(), self.loggable_id.clone())
    }

    fn is_owned_by(&self, owner: &OwnerRef) -> bool {
        self.loggable_type == owner.owner_type && self.loggable_id == owner.owner_id
    }

    /// Decode into the read model, parsing the payload text
    fn to_record(&self) -> LoggableResult<LogRecord> {
        let payload = ChangeSet::from_json_text(&self.model_logs).map_err(|e| {
            LoggableError::Storage(format!("Corrupt payload in log record {}: {}", self.id, e))
        })?;

        Ok(LogRecord {
            id: self.id,
            owner: self.owner(),
            actor_id: self.user_id.clone(),
            table_name: self.table_name.clone(),
            payload,
            reason: self.reason.clone(),
            created_at: self.created_at,
        })
    }
}

/// Serializable log table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LogTable {
    /// Last id handed out; ids are never reused after deletion
    #[serde(default)]
    sequence: u64,
    #[serde(default)]
    logs: Vec<LogRow>,
}

#[derive(Debug, Default)]
struct LogState {
    sequence: u64,
    rows: BTreeMap<LogId, LogRow>,
}

/// Repository for log record persistence
pub struct LogRepository {
    path: PathBuf,
    data: RwLock<LogState>,
}

impl LogRepository {
    /// Create a new log repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(LogState::default()),
        }
    }

    /// Load log records from disk
    pub fn load(&self) -> Result<(), LoggableError> {
        let table: LogTable = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let highest = table.logs.iter().map(|r| r.id.value()).max().unwrap_or(0);
        data.sequence = table.sequence.max(highest);
        data.rows = table.logs.into_iter().map(|row| (row.id, row)).collect();

        Ok(())
    }

    /// Save log records to disk
    pub fn save(&self) -> Result<(), LoggableError> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.persist(&data)
    }

    fn persist(&self, data: &LogState) -> Result<(), LoggableError> {
        let table = LogTable {
            sequence: data.sequence,
            logs: data.rows.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &table)
    }

    /// Get a log record by id
    pub fn get(&self, id: LogId) -> LoggableResult<Option<LogRecord>> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        data.rows.get(&id).map(LogRow::to_record).transpose()
    }

    /// Number of records held for `owner`
    pub fn count_for(&self, owner: &OwnerRef) -> LoggableResult<usize> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.rows.values().filter(|r| r.is_owned_by(owner)).count())
    }

    /// Every owner with at least one record, with its record count
    pub fn owners(&self) -> LoggableResult<Vec<(OwnerRef, usize)>> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut counts: BTreeMap<OwnerRef, usize> = BTreeMap::new();
        for row in data.rows.values() {
            *counts.entry(row.owner()).or_default() += 1;
        }

        Ok(counts.into_iter().collect())
    }

    /// Total number of records
    pub fn len(&self) -> LoggableResult<usize> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.rows.len())
    }

    pub fn is_empty(&self) -> LoggableResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl LogStore for LogRepository {
    fn insert(&self, record: NewLogRecord) -> LoggableResult<LogRecord> {
        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = LogId::new(data.sequence + 1);
        let row = LogRow {
            id,
            loggable_id: record.owner.owner_id,
            loggable_type: record.owner.owner_type,
            user_id: record.actor_id,
            table_name: record.table_name,
            model_logs: record.model_logs,
            reason: record.reason,
            created_at: record.created_at,
        };
        let stored = row.to_record()?;

        data.sequence = id.value();
        data.rows.insert(id, row);

        if let Err(e) = self.persist(&data) {
            data.rows.remove(&id);
            return Err(e);
        }

        Ok(stored)
    }

    fn list_for(&self, owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>> {
        let data = self.data.read().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut records = data
            .rows
            .values()
            .filter(|r| r.is_owned_by(owner))
            .map(LogRow::to_record)
            .collect::<LoggableResult<Vec<_>>>()?;

        records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(records)
    }

    fn delete(&self, id: LogId) -> LoggableResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            LoggableError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(row) = data.rows.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&data) {
            data.rows.insert(id, row);
            return Err(e);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LogRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models_logs.json");
        let repo = LogRepository::new(path);
        (temp_dir, repo)
    }

    fn invoice(id: u64) -> OwnerRef {
        OwnerRef::new("Invoice", id)
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let first = repo
            .insert(NewLogRecord::new(invoice(42), "INVOICES", r#"{"status":"draft"}"#))
            .unwrap();
        let second = repo
            .insert(NewLogRecord::new(invoice(42), "INVOICES", r#"{"status":"sent"}"#))
            .unwrap();

        assert_eq!(first.id, LogId::new(1));
        assert_eq!(second.id, LogId::new(2));
        assert_eq!(second.payload.get("status"), Some(&json!("sent")));
    }

    #[test]
    fn test_list_for_is_newest_first_and_scoped() {
        let (_temp_dir, repo) = create_test_repo();
        let now = Utc::now();

        for hours in [3, 1, 2] {
            repo.insert(
                NewLogRecord::new(invoice(42), "INVOICES", format!(r#"{{"h":{}}}"#, hours))
                    .with_created_at(now - Duration::hours(hours)),
            )
            .unwrap();
        }
        repo.insert(NewLogRecord::new(invoice(43), "INVOICES", "{}"))
            .unwrap();
        repo.insert(NewLogRecord::new(OwnerRef::new("Customer", 42u64), "CUSTOMERS", "{}"))
            .unwrap();

        let history = repo.list_for(&invoice(42)).unwrap();
        let hours: Vec<_> = history.iter().map(|r| r.payload.get("h").cloned()).collect();
        assert_eq!(hours, vec![Some(json!(1)), Some(json!(2)), Some(json!(3))]);
    }

    #[test]
    fn test_same_timestamp_orders_by_id() {
        let (_temp_dir, repo) = create_test_repo();
        let now = Utc::now();

        let a = repo
            .insert(NewLogRecord::new(invoice(1), "INVOICES", "{}").with_created_at(now))
            .unwrap();
        let b = repo
            .insert(NewLogRecord::new(invoice(1), "INVOICES", "{}").with_created_at(now))
            .unwrap();

        let ids: Vec<_> = repo.list_for(&invoice(1)).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_records_survive_reload() {
        let (temp_dir, repo) = create_test_repo();
        let record = NewLogRecord::new(invoice(42), "INVOICES", r#"{"status":"sent"}"#)
            .with_actor(Some(ActorId::from(7u64)))
            .with_reason(Some("resent".to_string()));
        let stored = repo.insert(record).unwrap();

        let reopened = LogRepository::new(temp_dir.path().join("models_logs.json"));
        reopened.load().unwrap();

        let loaded = reopened.get(stored.id).unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(NewLogRecord::new(invoice(1), "INVOICES", "{}")).unwrap();
        let last = repo.insert(NewLogRecord::new(invoice(1), "INVOICES", "{}")).unwrap();

        assert!(repo.delete(last.id).unwrap());
        assert!(!repo.delete(last.id).unwrap());

        let reopened = LogRepository::new(temp_dir.path().join("models_logs.json"));
        reopened.load().unwrap();
        let next = reopened
            .insert(NewLogRecord::new(invoice(1), "INVOICES", "{}"))
            .unwrap();
        assert_eq!(next.id, LogId::new(3));
    }

    #[test]
    fn test_rows_use_relational_column_names() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(NewLogRecord::new(invoice(42), "INVOICES", r#"{"status":"sent"}"#))
            .unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("models_logs.json")).unwrap();
        let table: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let row = &table["logs"][0];

        assert_eq!(row["loggable_type"], json!("Invoice"));
        assert_eq!(row["loggable_id"], json!("42"));
        assert_eq!(row["user_id"], json!(null));
        assert_eq!(row["table_name"], json!("INVOICES"));
        assert_eq!(row["model_logs"], json!(r#"{"status":"sent"}"#));
    }

    #[test]
    fn test_invalid_payload_rejected_on_insert() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo
            .insert(NewLogRecord::new(invoice(1), "INVOICES", "[1,2]"))
            .is_err());
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_owners_and_counts() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(NewLogRecord::new(invoice(2), "INVOICES", "{}")).unwrap();
        repo.insert(NewLogRecord::new(invoice(1), "INVOICES", "{}")).unwrap();
        repo.insert(NewLogRecord::new(invoice(1), "INVOICES", "{}")).unwrap();

        let owners = repo.owners().unwrap();
        assert_eq!(owners, vec![(invoice(1), 2), (invoice(2), 1)]);
        assert_eq!(repo.count_for(&invoice(1)).unwrap(), 2);
        assert_eq!(repo.len().unwrap(), 3);
    }
}
