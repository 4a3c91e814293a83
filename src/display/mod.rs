//! Display formatting for terminal output
//!
//! Provides utilities for formatting change history for terminal display.

pub mod log;

pub use log::{format_log_details, format_log_list, format_owner_list};
