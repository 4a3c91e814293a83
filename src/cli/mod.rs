//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod history;

pub use export::{handle_export_command, ExportFormat};
pub use history::{handle_history_command, HistoryCommands};
