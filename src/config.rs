//! Command-line and environment configuration for the `cashtab` binary.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::{db::IN_MEMORY_PATH, transaction::TransactionId};

/// A small expense log that keeps your transactions in a SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "CASHTAB_DB_PATH", default_value = "cashtab.db")]
    pub db_path: PathBuf,

    /// Also write debug logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// What to do. Opens the interactive list screen if omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// The actions that can be run without the interactive list screen.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show all transactions.
    List {
        /// Print the transactions as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Quickly add a new transaction.
    Add {
        /// What the money was spent on.
        title: String,
        /// How much was spent, e.g. "$1.99". Left empty if omitted.
        cost: Option<String>,
    },
    /// Change the title and/or cost of a transaction.
    Edit {
        /// The ID of the transaction, as shown by `list`.
        id: TransactionId,
        /// The new title. Keeps the current title if omitted.
        #[arg(long)]
        title: Option<String>,
        /// The new cost. Keeps the current cost if omitted.
        #[arg(long)]
        cost: Option<String>,
    },
    /// Delete a transaction.
    Delete {
        /// The ID of the transaction, as shown by `list`.
        id: TransactionId,
    },
    /// Open the interactive list screen.
    Interactive,
}

/// Check that `db_path` looks like a database file.
///
/// # Errors
/// Returns a message for the user if the path has no file extension.
pub fn validate_db_path(db_path: &Path) -> Result<(), String> {
    if db_path == Path::new(IN_MEMORY_PATH) {
        return Ok(());
    }

    match db_path.extension() {
        Some(extension) if !extension.is_empty() => Ok(()),
        _ => Err(format!(
            "Database path {db_path:?} must include a file extension (e.g., 'cashtab.db')."
        )),
    }
}
