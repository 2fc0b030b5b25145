//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Database identifier for a transaction.
///
/// IDs are assigned by the backing store when a transaction is created and are
/// never reused, even after the transaction is deleted.
pub type TransactionId = i64;

/// The title of a transaction, exactly as the user typed it.
///
/// The only rule is that it holds at least one character. Whitespace is kept
/// as is, so a title reads back from the database byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionTitle(String);

impl TransactionTitle {
    /// Wrap `title` after checking that it is not empty.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTitle] if `title` is the empty string.
    pub fn new(title: &str) -> Result<Self, Error> {
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        Ok(Self(title.to_owned()))
    }

    /// Wrap a title read back from the database.
    ///
    /// The table's `CHECK` constraint already guarantees it is not empty.
    pub(crate) fn from_row(title: String) -> Self {
        Self(title)
    }
}

impl AsRef<str> for TransactionTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionTitle::new(s)
    }
}

impl TryFrom<String> for TransactionTitle {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TransactionTitle::new(&value)
    }
}

impl From<TransactionTitle> for String {
    fn from(value: TransactionTitle) -> Self {
        value.0
    }
}

impl Display for TransactionTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single expense: what it was for and what it cost.
///
/// The cost is free text (e.g., "$1.99") and is never parsed as a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// What the money was spent on.
    pub title: TransactionTitle,
    /// How much was spent, as entered by the user.
    pub cost: String,
}

/// Two records are the same transaction if they share an ID, regardless of
/// whether one of them holds stale field values.
impl PartialEq for TransactionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TransactionRecord {}

impl TransactionRecord {
    /// Whether the title and cost of `self` and `other` are identical.
    pub fn same_values(&self, other: &TransactionRecord) -> bool {
        self.title == other.title && self.cost == other.cost
    }
}

/// A transaction that has not been written to the backing store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// What the money was spent on.
    pub title: TransactionTitle,
    /// How much was spent, as entered by the user.
    pub cost: String,
}

impl NewTransaction {
    /// Validate `title` and pair it with `cost`.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTitle] if `title` is empty.
    pub fn new(title: &str, cost: &str) -> Result<Self, Error> {
        Ok(Self {
            title: TransactionTitle::new(title)?,
            cost: cost.to_owned(),
        })
    }

    /// Attach the ID assigned by the backing store.
    pub fn finalise(self, id: TransactionId) -> TransactionRecord {
        TransactionRecord {
            id,
            title: self.title,
            cost: self.cost,
        }
    }
}

#[cfg(test)]
mod transaction_title_tests {
    use crate::{Error, transaction::TransactionTitle};

    #[test]
    fn new_fails_on_empty_string() {
        let title = TransactionTitle::new("");

        assert_eq!(title, Err(Error::EmptyTitle));
    }

    #[test]
    fn new_accepts_just_whitespace() {
        let title = TransactionTitle::new(" ").expect("Could not create title");

        assert_eq!(title.as_ref(), " ");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let title = TransactionTitle::new("☕");

        assert!(title.is_ok())
    }

    #[test]
    fn new_keeps_surrounding_whitespace() {
        let title = TransactionTitle::new("  Coffee \n").unwrap();

        assert_eq!(title.as_ref(), "  Coffee \n");
    }

    #[test]
    fn deserialize_rejects_empty_title() {
        let result = serde_json::from_str::<TransactionTitle>("\"\"");

        assert!(result.is_err());
    }
}
