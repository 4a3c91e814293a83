//! loggable - change auditing for persisted entities
//!
//! This library records, for every committed create or update of a tracked
//! entity, a log record holding the changed fields, who made the change and
//! an optional reason. Old records can be pruned to a per-type keep-count.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `audit`: Change capture, exclusion rules, commit hooks and retention
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Log records, owner references and typed identifiers
//! - `storage`: JSON file storage for log records and tracked entities
//! - `services`: History browsing on top of storage
//! - `display`, `export`, `cli`: Terminal output, file export, command handlers
//! - `logging`: Diagnostics subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use loggable::audit::{AuditEngine, AuditedStore, FixedActor, Tracked};
//! use loggable::config::{paths::LoggablePaths, settings::Settings};
//! use loggable::storage::Storage;
//!
//! let paths = LoggablePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let invoices = storage.entities::<Invoice>()?;
//! let actor = FixedActor::new(7u64);
//! let engine = AuditEngine::from_settings(&storage.logs, &actor, &settings.audit);
//! let store = AuditedStore::new(&invoices, engine);
//!
//! let mut invoice = invoices.find(42)?.expect("invoice");
//! invoice.status = "sent".into();
//! invoice.set_reason("customer asked");
//! store.save(&mut invoice)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LoggableError, LoggableResult};
