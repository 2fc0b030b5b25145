//! The transaction store: the only way records are created, changed or removed.
//!
//! Every operation writes to the [Backend] first and only touches the
//! in-memory list once that write has succeeded, so a failed operation leaves
//! both exactly as they were.

use std::sync::{Arc, Mutex};

use crate::{
    BackendError, Error,
    backend::Backend,
    transaction::{NewTransaction, TransactionId, TransactionRecord, TransactionTitle},
};

/// Handles the creation, retrieval, editing and deletion of transactions.
#[derive(Debug)]
pub struct TransactionStore<B> {
    backend: B,
    records: Vec<TransactionRecord>,
}

impl<B: Backend> TransactionStore<B> {
    /// Create a store and load the existing records from `backend`.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] if the records cannot be read.
    pub fn open(backend: B) -> Result<Self, Error> {
        let mut store = Self {
            backend,
            records: Vec::new(),
        };
        store.list()?;

        Ok(store)
    }

    /// Re-read every record from the backing store and return them in the
    /// order they were created.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] if the backing store cannot be read, in
    /// which case the previously loaded records are kept.
    pub fn list(&mut self) -> Result<&[TransactionRecord], Error> {
        tracing::debug!("Reloading transactions from the backing store");

        let records = self.backend.read_all().map_err(Error::StorageRead)?;
        self.records = records;

        Ok(&self.records)
    }

    /// The records as of the last successful read or write, without touching
    /// the backing store.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Find a loaded record by its ID.
    pub fn get(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Create a new transaction and append it to the list.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyTitle] if `title` is empty,
    /// - or [Error::StorageWrite] if the transaction could not be saved.
    pub fn create(&mut self, title: &str, cost: &str) -> Result<TransactionRecord, Error> {
        let transaction = NewTransaction::new(title, cost).inspect_err(|_| {
            tracing::warn!("Rejected transaction with an empty title");
        })?;

        let record = self
            .backend
            .insert(transaction)
            .map_err(Error::StorageWrite)?;
        self.records.push(record.clone());

        tracing::info!("Created transaction {}", record.id);

        Ok(record)
    }

    /// Replace the title and cost of the transaction `id`.
    ///
    /// The transaction keeps its ID and its position in the list.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a known transaction,
    /// - [Error::EmptyTitle] if `title` is empty,
    /// - or [Error::StorageWrite] if the change could not be saved.
    pub fn update(
        &mut self,
        id: TransactionId,
        title: &str,
        cost: &str,
    ) -> Result<TransactionRecord, Error> {
        let index = self.position(id)?;
        let title = TransactionTitle::new(title)?;

        let updated = TransactionRecord {
            id,
            title,
            cost: cost.to_owned(),
        };
        self.backend
            .update(&updated)
            .map_err(|error| map_write_error(id, error))?;
        self.records[index] = updated.clone();

        tracing::info!("Updated transaction {id}");

        Ok(updated)
    }

    /// Delete the transaction `id`.
    ///
    /// Deleting the same ID twice fails the second time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a known transaction,
    /// - or [Error::StorageWrite] if the deletion could not be saved.
    pub fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let index = self.position(id)?;

        self.backend
            .delete(id)
            .map_err(|error| map_write_error(id, error))?;
        self.records.remove(index);

        tracing::info!("Deleted transaction {id}");

        Ok(())
    }

    fn position(&self, id: TransactionId) -> Result<usize, Error> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(Error::NotFound(id))
    }
}

fn map_write_error(id: TransactionId, error: BackendError) -> Error {
    match error {
        BackendError::MissingRow(_) => Error::NotFound(id),
        error => Error::StorageWrite(error),
    }
}

/// A [TransactionStore] that can be shared between threads.
///
/// Each operation holds a single lock for its whole read-modify-write
/// sequence.
#[derive(Debug)]
pub struct SharedTransactionStore<B> {
    inner: Arc<Mutex<TransactionStore<B>>>,
}

impl<B> Clone for SharedTransactionStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Backend> SharedTransactionStore<B> {
    /// Wrap `store` so it can be used from several threads.
    pub fn new(store: TransactionStore<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [TransactionStore::list].
    pub fn list(&self) -> Result<Vec<TransactionRecord>, Error> {
        self.with_store(|store| store.list().map(<[TransactionRecord]>::to_vec))
    }

    /// See [TransactionStore::create].
    pub fn create(&self, title: &str, cost: &str) -> Result<TransactionRecord, Error> {
        self.with_store(|store| store.create(title, cost))
    }

    /// See [TransactionStore::update].
    pub fn update(
        &self,
        id: TransactionId,
        title: &str,
        cost: &str,
    ) -> Result<TransactionRecord, Error> {
        self.with_store(|store| store.update(id, title, cost))
    }

    /// See [TransactionStore::delete].
    pub fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.with_store(|store| store.delete(id))
    }

    fn with_store<T>(
        &self,
        operation: impl FnOnce(&mut TransactionStore<B>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut store = self.inner.lock().map_err(|_| Error::StoreLockPoisoned)?;

        operation(&mut *store)
    }
}
