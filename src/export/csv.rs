//! CSV Export functionality
//!
//! One row per log record; the payload column holds the stored JSON text.

use crate::error::{LoggableError, LoggableResult};
use crate::export::json::HistoryExport;
use crate::models::OwnerRef;
use crate::storage::Storage;
use std::io::Write;

const HEADER: [&str; 7] = ["ID", "Created", "Owner", "Table", "Actor", "Reason", "Changes"];

/// Export the history of one owner to CSV
pub fn export_history_csv<W: Write>(
    storage: &Storage,
    owner: &OwnerRef,
    writer: &mut W,
) -> LoggableResult<()> {
    let export = HistoryExport::from_storage(storage, owner)?;
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| LoggableError::Export(e.to_string()))?;

    for record in &export.records {
        let owner = record.owner.to_string();
        let actor = record
            .actor_id
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_default();
        let changes = record.payload.to_json_text()?;
        let id = record.id.to_string();
        let created = record.created_at.to_rfc3339();

        csv_writer
            .write_record([
                id.as_str(),
                created.as_str(),
                owner.as_str(),
                record.table_name.as_str(),
                actor.as_str(),
                record.reason.as_deref().unwrap_or(""),
                changes.as_str(),
            ])
            .map_err(|e| LoggableError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LoggableError::Export(e.to_string()))?;

    Ok(())
}
