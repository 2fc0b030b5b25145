//! CashTab is a small personal expense log.
//!
//! Each entry records what a purchase was for (a title) and what it cost (free
//! text such as "$3.50"). Entries are kept in a SQLite database and managed
//! through a [TransactionStore], which guarantees that the in-memory list and
//! the database never disagree after an operation returns.
//!
//! The [terminal] module provides the interactive list screen used by the
//! `cashtab` binary.

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod db;
mod error;
pub mod logging;
pub mod store;
pub mod terminal;
pub mod transaction;
pub mod view;

pub use backend::{Backend, SqliteBackend};
pub use error::{BackendError, Error};
pub use store::{SharedTransactionStore, TransactionStore};
pub use transaction::{NewTransaction, TransactionId, TransactionRecord, TransactionTitle};
