//! YAML Export functionality
//!
//! Exports one owner's change history to YAML for human review.

use crate::error::{LoggableError, LoggableResult};
use crate::export::json::HistoryExport;
use crate::models::OwnerRef;
use crate::storage::Storage;
use std::io::Write;

/// Export the history of one owner to YAML format
pub fn export_history_yaml<W: Write>(
    storage: &Storage,
    owner: &OwnerRef,
    writer: &mut W,
) -> LoggableResult<()> {
    let export = HistoryExport::from_storage(storage, owner)?;

    write_header(writer, &export).map_err(|e| LoggableError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LoggableError::Export(e.to_string()))?;

    Ok(())
}

fn write_header<W: Write>(writer: &mut W, export: &HistoryExport) -> std::io::Result<()> {
    writeln!(writer, "# Change history of {}", export.owner)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "# Records: {} (newest first)", export.records.len())?;
    writeln!(writer)
}
