//! In-memory stores and a sample entity shared by the audit tests

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde::Serialize;

use super::auditable::Auditable;
use super::pipeline::EntityStore;
use super::store::LogStore;
use crate::error::{LoggableError, LoggableResult};
use crate::models::{ChangeSet, LogId, LogRecord, NewLogRecord, OwnerId, OwnerRef};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: Option<u64>,
    pub status: String,
    pub updated_at: Option<String>,
    pub insert_date: Option<String>,
    #[serde(skip)]
    pub hidden: Vec<&'static str>,
    #[serde(skip)]
    pub keep: Option<u32>,
}

impl Invoice {
    pub fn draft() -> Self {
        Self {
            id: None,
            status: "draft".to_string(),
            updated_at: None,
            insert_date: None,
            hidden: Vec::new(),
            keep: None,
        }
    }

    pub fn stored(id: u64, status: &str) -> Self {
        Self {
            id: Some(id),
            status: status.to_string(),
            updated_at: Some("T0".to_string()),
            ..Self::draft()
        }
    }
}

impl Auditable for Invoice {
    const OWNER_TYPE: &'static str = "Invoice";
    const TABLE_NAME: &'static str = "INVOICES";

    fn key(&self) -> Option<OwnerId> {
        self.id.map(OwnerId::from)
    }

    fn dont_log_fields(&self) -> &[&str] {
        &self.hidden
    }

    fn keep_old_logs(&self) -> Option<u32> {
        self.keep
    }
}

#[derive(Default)]
pub struct MemoryLogs {
    records: RefCell<Vec<LogRecord>>,
    next_id: Cell<u64>,
}

impl MemoryLogs {
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }
}

impl LogStore for MemoryLogs {
    fn insert(&self, record: NewLogRecord) -> LoggableResult<LogRecord> {
        self.next_id.set(self.next_id.get() + 1);
        let stored = LogRecord {
            id: LogId::new(self.next_id.get()),
            owner: record.owner,
            actor_id: record.actor_id,
            table_name: record.table_name,
            payload: ChangeSet::from_json_text(&record.model_logs)?,
            reason: record.reason,
            created_at: record.created_at,
        };
        self.records.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    fn list_for(&self, owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>> {
        let mut records: Vec<LogRecord> = self
            .records
            .borrow()
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(records)
    }

    fn delete(&self, id: LogId) -> LoggableResult<bool> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}

pub struct FailingLogs;

impl LogStore for FailingLogs {
    fn insert(&self, _record: NewLogRecord) -> LoggableResult<LogRecord> {
        Err(LoggableError::Storage("log table unavailable".into()))
    }

    fn list_for(&self, _owner: &OwnerRef) -> LoggableResult<Vec<LogRecord>> {
        Err(LoggableError::Storage("log table unavailable".into()))
    }

    fn delete(&self, _id: LogId) -> LoggableResult<bool> {
        Err(LoggableError::Storage("log table unavailable".into()))
    }
}

#[derive(Default)]
pub struct MemoryInvoices {
    rows: RefCell<BTreeMap<u64, Invoice>>,
    commits: Cell<u64>,
}

impl MemoryInvoices {
    pub fn get(&self, id: u64) -> Option<Invoice> {
        self.rows.borrow().get(&id).cloned()
    }
}

impl EntityStore<Invoice> for MemoryInvoices {
    fn commit(&self, entity: &mut Invoice, exists: bool) -> LoggableResult<()> {
        self.commits.set(self.commits.get() + 1);
        if !exists {
            let next = self.rows.borrow().keys().max().copied().unwrap_or(0) + 1;
            entity.id = Some(next);
        }
        entity.updated_at = Some(format!("T{}", self.commits.get()));

        let id = entity
            .id
            .ok_or_else(|| LoggableError::Storage("update without key".into()))?;
        self.rows.borrow_mut().insert(id, entity.clone());
        Ok(())
    }
}

pub struct FailingInvoices;

impl EntityStore<Invoice> for FailingInvoices {
    fn commit(&self, _entity: &mut Invoice, _exists: bool) -> LoggableResult<()> {
        Err(LoggableError::Storage("constraint violation".into()))
    }
}
