//! CLI command for history export

use crate::error::{LoggableError, LoggableResult};
use crate::export::{csv, json, yaml};
use crate::models::OwnerRef;
use crate::storage::Storage;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per record)
    Csv,
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Handle history export
pub fn handle_export_command(
    storage: &Storage,
    owner: &str,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> LoggableResult<()> {
    let owner: OwnerRef = owner.parse()?;

    let file = File::create(&output).map_err(|e| {
        LoggableError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => csv::export_history_csv(storage, &owner, &mut writer)?,
        ExportFormat::Json => json::export_history_json(storage, &owner, &mut writer, pretty)?,
        ExportFormat::Yaml => yaml::export_history_yaml(storage, &owner, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| LoggableError::Export(e.to_string()))?;

    println!("History of {} exported to: {}", owner, output.display());

    Ok(())
}
