//! # Book Service
//!
//! Batch wrapper over the book store. Reads pass straight through;
//! writes take a list of books and apply the store operation to each
//! item independently. A failing item never aborts the batch: every
//! item is processed, and the first error encountered is the one
//! returned. Per-item detail beyond that first error is not reported.

use tracing::error;

use crate::store::{Book, BookStore, StoreError, StoreResult};

/// Orchestrates multi-record requests against the book store
#[derive(Debug, Clone)]
pub struct BookService {
    store: BookStore,
}

impl BookService {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }

    pub async fn get_all_books(&self) -> StoreResult<Vec<Book>> {
        self.store.get_all_books().await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> StoreResult<Book> {
        self.store.get_by_isbn(isbn).await
    }

    pub async fn get_by_author(&self, author: &str) -> StoreResult<Vec<Book>> {
        self.store.get_by_author(author).await
    }

    pub async fn get_in_range(&self, from: i64, to: i64) -> StoreResult<Vec<Book>> {
        self.store.get_in_range(from, to).await
    }

    /// Insert each book. An isbn that already exists is a conflict for
    /// that item; the rest of the batch still runs.
    pub async fn insert(&self, books: &[Book]) -> StoreResult<()> {
        let mut first_err = None;
        for book in books {
            let outcome = match self.store.get_by_isbn(&book.isbn).await {
                Ok(_) => Err(StoreError::Conflict(book.isbn.clone())),
                Err(e) if e.is_not_found() => self.store.insert(book).await.map(|_| ()),
                Err(e) => Err(e),
            };
            record_failure(&mut first_err, outcome, "insert", &book.isbn);
        }
        finish(first_err)
    }

    /// Update each book, confirming it exists first.
    pub async fn update(&self, books: &[Book]) -> StoreResult<()> {
        let mut first_err = None;
        for book in books {
            let outcome = match self.store.get_by_isbn(&book.isbn).await {
                Ok(_) => self.store.update(book).await,
                Err(e) => Err(e),
            };
            record_failure(&mut first_err, outcome, "update", &book.isbn);
        }
        finish(first_err)
    }

    /// Delete each book, confirming it exists first.
    pub async fn delete(&self, books: &[Book]) -> StoreResult<()> {
        let mut first_err = None;
        for book in books {
            let outcome = match self.store.get_by_isbn(&book.isbn).await {
                Ok(_) => self.store.delete(book).await,
                Err(e) => Err(e),
            };
            record_failure(&mut first_err, outcome, "delete", &book.isbn);
        }
        finish(first_err)
    }
}

fn record_failure(
    first_err: &mut Option<StoreError>,
    outcome: StoreResult<()>,
    op: &str,
    isbn: &str,
) {
    if let Err(e) = outcome {
        error!(op, isbn, %e, "batch item failed");
        if first_err.is_none() {
            *first_err = Some(e);
        }
    }
}

fn finish(first_err: Option<StoreError>) -> StoreResult<()> {
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
