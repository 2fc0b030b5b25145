//! The errors that may occur while managing transactions.

use crate::transaction::TransactionId;

/// The errors that may occur in the application.
///
/// Each variant corresponds to one kind of failure so that callers can react
/// differently to, e.g., a missing title versus a database that cannot be
/// written to.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a transaction title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// The requested transaction was not found.
    ///
    /// The caller should refresh its list of transactions, the transaction
    /// may have already been deleted.
    #[error("could not find a transaction with the ID {0}")]
    NotFound(TransactionId),

    /// The transactions could not be read from the backing store.
    ///
    /// The in-memory list of transactions is left as it was before the read.
    #[error("could not read transactions: {0}")]
    StorageRead(BackendError),

    /// A change could not be written to the backing store.
    ///
    /// Nothing was changed, the operation can be retried.
    #[error("could not save changes: {0}")]
    StorageWrite(BackendError),

    /// Another thread panicked while holding the store lock.
    #[error("could not acquire the store lock")]
    StoreLockPoisoned,
}

impl Error {
    /// Whether the error came from the backing store rather than the input.
    ///
    /// Storage errors leave state unchanged, so retrying the same operation
    /// is safe.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Error::StorageRead(_) | Error::StorageWrite(_) | Error::StoreLockPoisoned
        )
    }
}

/// Errors originating from a [Backend](crate::Backend).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BackendError {
    /// No row exists for the transaction ID.
    #[error("no row for transaction {0}")]
    MissingRow(TransactionId),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        BackendError::Sql(value)
    }
}
