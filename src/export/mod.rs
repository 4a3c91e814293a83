//! Export module for loggable
//!
//! Exports the change history of one owner in multiple formats:
//! - CSV: one row per record (spreadsheet-compatible)
//! - JSON: machine-readable, schema-versioned
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_history_csv;
pub use json::{export_history_json, HistoryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_history_yaml;
