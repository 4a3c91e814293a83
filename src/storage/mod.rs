//! Storage layer for loggable
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The log table lives beside any entity tables the host keeps.

pub mod entities;
pub mod file_io;
pub mod logs;

pub use entities::{EntityRepository, Sequenced};
pub use file_io::{read_json, write_json_atomic};
pub use logs::LogRepository;

use crate::config::paths::LoggablePaths;
use crate::error::LoggableError;

/// Main storage coordinator
pub struct Storage {
    paths: LoggablePaths,
    pub logs: LogRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LoggablePaths) -> Result<Self, LoggableError> {
        paths.ensure_directories()?;

        Ok(Self {
            logs: LogRepository::new(paths.logs_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LoggablePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LoggableError> {
        self.logs.load()?;
        Ok(())
    }

    /// Open a repository for a tracked entity table under the data directory
    pub fn entities<E>(&self) -> Result<EntityRepository<E>, LoggableError>
    where
        E: crate::audit::Auditable
            + Sequenced
            + serde::Serialize
            + serde::de::DeserializeOwned
            + Clone,
    {
        let repo = EntityRepository::new(self.paths.entity_file(E::TABLE_NAME));
        repo.load()?;
        Ok(repo)
    }
}
