//! CLI commands for browsing change history
//!
//! Implements the `log` subcommands over the history service.

use clap::Subcommand;

use crate::display::{format_log_details, format_log_list, format_owner_list};
use crate::error::{LoggableError, LoggableResult};
use crate::models::{LogId, OwnerRef};
use crate::services::HistoryService;
use crate::storage::Storage;

/// Log history subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List the log records of an entity, newest first
    List {
        /// Entity in Type#id form (e.g. Invoice#42)
        owner: String,
        /// Show only the N newest records
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one log record with its changes
    Show {
        /// Log record ID
        id: String,
    },
    /// List every entity that has history
    Owners,
    /// Delete all but the newest records of an entity
    Prune {
        /// Entity in Type#id form
        owner: String,
        /// Number of records to keep
        #[arg(short, long)]
        keep: u32,
    },
}

/// Handle log history commands
pub fn handle_history_command(storage: &Storage, cmd: HistoryCommands) -> LoggableResult<()> {
    let service = HistoryService::new(storage);

    match cmd {
        HistoryCommands::List { owner, limit } => {
            let owner: OwnerRef = owner.parse()?;
            let records = match limit {
                Some(limit) => service.recent(&owner, limit)?,
                None => service.list(&owner)?,
            };

            println!("History of {}", owner);
            print!("{}", format_log_list(&records));
            if records.is_empty() {
                println!();
            }
        }
        HistoryCommands::Show { id } => {
            let id = parse_log_id(&id)?;
            let record = service.show(id)?;
            print!("{}", format_log_details(&record));
        }
        HistoryCommands::Owners => {
            let owners = service.owners()?;
            print!("{}", format_owner_list(&owners));
            if owners.is_empty() {
                println!();
            }
        }
        HistoryCommands::Prune { owner, keep } => {
            let owner: OwnerRef = owner.parse()?;
            let deleted = service.prune(&owner, keep)?;

            if deleted.is_empty() {
                println!("Nothing to prune for {} (keeping {}).", owner, keep);
            } else {
                println!(
                    "Pruned {} log record(s) of {}, kept the newest {}.",
                    deleted.len(),
                    owner,
                    keep
                );
            }
        }
    }

    Ok(())
}

fn parse_log_id(input: &str) -> LoggableResult<LogId> {
    input
        .parse()
        .map_err(|_| LoggableError::Validation(format!("Invalid log record ID: '{}'", input)))
}
