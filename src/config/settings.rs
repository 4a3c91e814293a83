//! User settings for loggable
//!
//! Manages audit capture preferences: automatic retention pruning, the
//! fallback keep-count and the diagnostics filter.

use serde::{Deserialize, Serialize};

use super::paths::LoggablePaths;
use crate::error::LoggableError;

/// Audit capture and retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Run the retention pruner after every captured record
    #[serde(default = "default_auto_prune")]
    pub auto_prune: bool,

    /// Keep-count used when an entity type does not declare its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_keep: Option<u32>,
}

fn default_auto_prune() -> bool {
    true
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            auto_prune: default_auto_prune(),
            default_keep: None,
        }
    }
}

/// User settings for loggable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Capture and retention behaviour
    #[serde(default)]
    pub audit: AuditSettings,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit: AuditSettings::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LoggablePaths) -> Result<Self, LoggableError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LoggableError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LoggableError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LoggablePaths) -> Result<(), LoggableError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LoggableError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            LoggableError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.audit.auto_prune);
        assert_eq!(settings.audit.default_keep, None);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LoggablePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit.auto_prune = false;
        settings.audit.default_keep = Some(10);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.audit.auto_prune);
        assert_eq!(loaded.audit.default_keep, Some(10));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"audit": {}}"#).unwrap();
        assert!(settings.audit.auto_prune);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LoggablePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LoggableError::Config(_)));
    }
}
