//! Service layer for loggable
//!
//! The service layer sits on top of the storage layer and backs the CLI.

pub mod history;

pub use history::{HistoryService, OwnerSummary};
