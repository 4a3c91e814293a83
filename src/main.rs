use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use loggable::cli::{handle_export_command, handle_history_command, ExportFormat, HistoryCommands};
use loggable::config::{paths::LoggablePaths, settings::Settings};
use loggable::logging::init_logging;
use loggable::storage::Storage;

#[derive(Parser)]
#[command(
    name = "loggable",
    version,
    about = "Inspect and maintain the change history of audited entities",
    long_about = "loggable keeps one log record per committed change of an audited \
                  entity. This tool browses that history, exports it and prunes \
                  old records."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and prune log records
    #[command(subcommand)]
    Log(HistoryCommands),

    /// Export the history of one entity
    Export {
        /// Entity in Type#id form (e.g. Invoice#42)
        owner: String,

        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LoggablePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_filter);

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Log(cmd)) => {
            handle_history_command(&storage, cmd)?;
        }
        Some(Commands::Export {
            owner,
            output,
            format,
            pretty,
        }) => {
            handle_export_command(&storage, &owner, output, format, pretty)?;
        }
        Some(Commands::Config) => {
            let keep = settings
                .audit
                .default_keep
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unlimited".to_string());

            println!("loggable Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Log store:       {}", paths.logs_file().display());
            println!();
            println!("Settings:");
            println!("  Auto-prune:   {}", settings.audit.auto_prune);
            println!("  Default keep: {}", keep);
            println!("  Log filter:   {}", settings.log_filter);
        }
        None => {
            println!("loggable - change history for audited entities");
            println!();
            println!("Run 'loggable --help' for usage information.");
        }
    }

    Ok(())
}
