//! Opening and initialising the application's SQLite database.

use std::path::Path;

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::BackendError;

/// The path that selects a database that only lives in memory.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Open the database at `path`, creating the file and tables if needed.
///
/// The special path [IN_MEMORY_PATH] opens a fresh in-memory database.
///
/// # Errors
/// Returns an error if the file cannot be opened or the tables cannot be created.
pub fn open(path: &Path) -> Result<Connection, BackendError> {
    let connection = if path == Path::new(IN_MEMORY_PATH) {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };

    initialize(&connection)?;
    tracing::debug!("Opened database at {path:?}");

    Ok(connection)
}

/// Create the tables for the domain models if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), BackendError> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) > 0),
                cost TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
         SELECT 'transaction', 0
         WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod db_tests {
    use std::path::Path;

    use rusqlite::Connection;

    use super::{IN_MEMORY_PATH, initialize, open};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Could not initialize database a second time");
    }

    #[test]
    fn open_in_memory_creates_table() {
        let connection = open(Path::new(IN_MEMORY_PATH)).expect("Could not open database");

        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM \"transaction\"", [], |row| row.get(0))
            .expect("Could not count transactions");

        assert_eq!(count, 0);
    }

    #[test]
    fn table_rejects_empty_titles() {
        let connection = open(Path::new(IN_MEMORY_PATH)).unwrap();

        let result = connection.execute(
            "INSERT INTO \"transaction\" (title, cost) VALUES (?1, ?2)",
            ("", "1.00"),
        );

        assert!(result.is_err());
    }

    #[test]
    fn table_accepts_whitespace_titles() {
        let connection = open(Path::new(IN_MEMORY_PATH)).unwrap();

        let result = connection.execute(
            "INSERT INTO \"transaction\" (title, cost) VALUES (?1, ?2)",
            ("  ", "1.00"),
        );

        assert_eq!(result, Ok(1));
    }
}
