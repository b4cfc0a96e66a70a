//! Core data model.
//!
//! A book is one catalogued title: who wrote it and how much we liked it.

use serde::{Deserialize, Serialize};

/// Lowest accepted rating, inclusive.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating, inclusive.
pub const MAX_RATING: f64 = 100.0;

/// A book record as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier. Never changes after insert.
    pub id: BookId,

    /// Unique across all books.
    pub title: String,

    pub author: String,

    /// Always within `MIN_RATING..=MAX_RATING`.
    pub rating: f64,
}

/// Newtype for book IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

/// A validated book that has not been stored yet.
///
/// Only produced by [`crate::validation::validate_new_book`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub rating: f64,
}

/// Is `rating` inside the accepted range?
pub fn rating_in_range(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}
