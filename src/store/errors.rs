//! # Store Errors
//!
//! Error types shared by the author, link, and book stores.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the catalog stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// A read matched zero rows. Empty tables on list reads also land
    /// here: zero rows is an error, uniformly, across every read.
    #[error("no {0} found")]
    NotFound(&'static str),

    /// An insert targeted an isbn that is already present
    #[error("book {0} already exists")]
    Conflict(String),

    /// The database rejected a write
    #[error("write failed: {0}")]
    WriteFailed(#[source] sqlx::Error),

    /// The database rejected a read for a reason other than "no rows"
    #[error("query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// A later step of a multi-statement write failed after earlier
    /// steps were applied. Nothing is rolled back; the earlier side
    /// effects persist.
    #[error("partial write: {step} step failed: {source}")]
    PartialWrite {
        step: &'static str,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// True when the error means "zero matching rows"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
