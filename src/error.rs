//! Custom error types for loggable
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for loggable operations
#[derive(Error, Debug)]
pub enum LoggableError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for identifiers and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LoggableError {
    /// Create a "not found" error for log records
    pub fn log_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Log record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tracked entities
    pub fn entity_not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LoggableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LoggableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for loggable operations
pub type LoggableResult<T> = Result<T, LoggableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoggableError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LoggableError::log_not_found("17");
        assert_eq!(err.to_string(), "Log record not found: 17");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_entity_not_found_error() {
        let err = LoggableError::entity_not_found("Invoice", "42");
        assert_eq!(err.to_string(), "Invoice not found: 42");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LoggableError = io_err.into();
        assert!(matches!(err, LoggableError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LoggableError = json_err.into();
        assert!(matches!(err, LoggableError::Json(_)));
    }
}
