//! Collection loading and querying.
//!
//! A [`Collection`] materializes a record type's whole stored collection
//! on every call. There is no cache: each query is one adapter read.

mod loader;

pub use loader::Collection;

use crate::record::Record;

/// Result of [`Collection::first`] and [`Collection::last`].
///
/// A limit of exactly 1 yields [`Limited::One`]; any other limit yields
/// [`Limited::Many`] holding at most that many records.
#[derive(Debug, Clone, PartialEq)]
pub enum Limited {
    /// Single result, `None` when the collection is empty.
    One(Option<Record>),
    /// Up to `limit` results in stored order.
    Many(Vec<Record>),
}

impl Limited {
    /// Returns the single result, if this is [`Limited::One`] and non-empty.
    #[must_use]
    pub fn one(self) -> Option<Record> {
        match self {
            Limited::One(record) => record,
            Limited::Many(_) => None,
        }
    }

    /// Flattens into a vector regardless of variant.
    #[must_use]
    pub fn into_vec(self) -> Vec<Record> {
        match self {
            Limited::One(record) => record.into_iter().collect(),
            Limited::Many(records) => records,
        }
    }

    /// Returns the number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Limited::One(record) => usize::from(record.is_some()),
            Limited::Many(records) => records.len(),
        }
    }

    /// Returns true if no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
