//! Configuration module for loggable
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Audit capture and retention settings

pub mod paths;
pub mod settings;

pub use paths::LoggablePaths;
pub use settings::{AuditSettings, Settings};
