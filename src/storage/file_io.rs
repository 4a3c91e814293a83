//! Whole-file JSON tables
//!
//! A table write either lands completely or leaves the previous file in
//! place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LoggableError;

/// Read a table, or its default when the file has not been written yet
pub fn read_json<T, P>(path: P) -> Result<T, LoggableError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LoggableError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LoggableError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace a table through a synced sibling temp file
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LoggableError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LoggableError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LoggableError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LoggableError::Storage(format!("Failed to serialize table: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LoggableError::Storage(format!("Failed to flush table: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LoggableError::Storage(format!("Failed to sync table: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LoggableError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    Ok(())
}
