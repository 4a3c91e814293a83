//! JSON Export functionality
//!
//! Exports one owner's change history to JSON format with schema versioning.

use crate::audit::LogStore;
use crate::error::{LoggableError, LoggableResult};
use crate::models::{LogRecord, OwnerRef};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// History export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Entity whose history this is
    pub owner: OwnerRef,

    /// Log records, newest first
    pub records: Vec<LogRecord>,
}

impl HistoryExport {
    /// Collect the history of `owner` from storage
    pub fn from_storage(storage: &Storage, owner: &OwnerRef) -> LoggableResult<Self> {
        let records = storage.logs.list_for(owner)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner: owner.clone(),
            records,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if let Some(stray) = self.records.iter().find(|r| r.owner != self.owner) {
            return Err(format!(
                "Log record {} belongs to {}, not {}",
                stray.id, stray.owner, self.owner
            ));
        }

        Ok(())
    }
}

/// Export the history of one owner to JSON
pub fn export_history_json<W: Write>(
    storage: &Storage,
    owner: &OwnerRef,
    writer: &mut W,
    pretty: bool,
) -> LoggableResult<()> {
    let export = HistoryExport::from_storage(storage, owner)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LoggableError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LoggablePaths;
    use crate::models::NewLogRecord;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LoggablePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_history_json() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerRef::new("Invoice", 42u64);
        storage
            .logs
            .insert(NewLogRecord::new(owner.clone(), "INVOICES", r#"{"status":"draft"}"#))
            .unwrap();
        storage
            .logs
            .insert(NewLogRecord::new(OwnerRef::new("Invoice", 43u64), "INVOICES", "{}"))
            .unwrap();

        let mut buffer = Vec::new();
        export_history_json(&storage, &owner, &mut buffer, true).unwrap();

        let parsed: HistoryExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.owner, owner);
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_foreign_records() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerRef::new("Invoice", 42u64);
        storage
            .logs
            .insert(NewLogRecord::new(owner.clone(), "INVOICES", "{}"))
            .unwrap();

        let mut export = HistoryExport::from_storage(&storage, &owner).unwrap();
        export.owner = OwnerRef::new("Invoice", 1u64);
        assert!(export.validate().is_err());
    }
}
