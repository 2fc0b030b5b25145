//! The durable medium that transactions are persisted to.

use std::path::Path;

use rusqlite::{Connection, Row};

use crate::{
    BackendError, db,
    transaction::{NewTransaction, TransactionId, TransactionRecord, TransactionTitle},
};

/// A durable store of transaction records keyed by ID.
///
/// Every method either commits its change before returning `Ok` or changes
/// nothing and returns an error.
pub trait Backend {
    /// Read every record in the order they were created.
    fn read_all(&self) -> Result<Vec<TransactionRecord>, BackendError>;

    /// Store `transaction` and return it with its newly assigned ID.
    fn insert(&mut self, transaction: NewTransaction) -> Result<TransactionRecord, BackendError>;

    /// Overwrite the title and cost of the record with `record.id`.
    ///
    /// Implementers should return [BackendError::MissingRow] if no such record
    /// exists.
    fn update(&mut self, record: &TransactionRecord) -> Result<(), BackendError>;

    /// Remove the record with `id`.
    ///
    /// Implementers should return [BackendError::MissingRow] if no such record
    /// exists.
    fn delete(&mut self, id: TransactionId) -> Result<(), BackendError>;
}

/// Stores transactions in a SQLite database.
#[derive(Debug)]
pub struct SqliteBackend {
    connection: Connection,
}

impl SqliteBackend {
    /// Create a backend for an already open `connection`, adding the
    /// transaction table if it is missing.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, BackendError> {
        db::initialize(&connection)?;

        Ok(Self { connection })
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or initialised.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let connection = db::open(path)?;

        Ok(Self { connection })
    }

    /// Open a fresh database that only lives in memory.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, BackendError> {
        Self::new(Connection::open_in_memory()?)
    }
}

impl Backend for SqliteBackend {
    fn read_all(&self) -> Result<Vec<TransactionRecord>, BackendError> {
        self.connection
            .prepare("SELECT id, title, cost FROM \"transaction\" ORDER BY id ASC")?
            .query_map([], map_transaction_row)?
            .map(|maybe_record| maybe_record.map_err(BackendError::from))
            .collect()
    }

    fn insert(&mut self, transaction: NewTransaction) -> Result<TransactionRecord, BackendError> {
        let record = self
            .connection
            .prepare(
                "INSERT INTO \"transaction\" (title, cost) VALUES (?1, ?2)
                 RETURNING id, title, cost",
            )?
            .query_row(
                (transaction.title.as_ref(), transaction.cost.as_str()),
                map_transaction_row,
            )?;

        Ok(record)
    }

    fn update(&mut self, record: &TransactionRecord) -> Result<(), BackendError> {
        let rows_affected = self.connection.execute(
            "UPDATE \"transaction\" SET title = ?1, cost = ?2 WHERE id = ?3",
            (record.title.as_ref(), record.cost.as_str(), record.id),
        )?;

        if rows_affected == 0 {
            return Err(BackendError::MissingRow(record.id));
        }

        Ok(())
    }

    fn delete(&mut self, id: TransactionId) -> Result<(), BackendError> {
        let rows_affected = self
            .connection
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(BackendError::MissingRow(id));
        }

        Ok(())
    }
}

/// Map a database row to a [TransactionRecord].
///
/// Rows are expected to hold the columns `id, title, cost` in that order.
pub fn map_transaction_row(row: &Row) -> Result<TransactionRecord, rusqlite::Error> {
    let id = row.get(0)?;
    let title = TransactionTitle::from_row(row.get(1)?);
    let cost = row.get(2)?;

    Ok(TransactionRecord { id, title, cost })
}
