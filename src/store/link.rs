//! # Link Store
//!
//! CRUD over the `book_author` join table: one row per book, linking
//! an isbn to an author id. The table name suggests many-to-many, but
//! the contract is 1:1 — `UNIQUE(id_book)` makes a second link for the
//! same isbn a write conflict.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use super::errors::{StoreError, StoreResult};

/// A book-to-author association row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookAuthor {
    pub id_book: String,
    pub id_author: i64,
}

/// Store for link rows; owned by the book store, not exposed to API
/// callers.
#[derive(Debug, Clone)]
pub struct LinkStore {
    pool: SqlitePool,
}

impl LinkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Associate a book with an author. Fails on a duplicate isbn or a
    /// connection error.
    pub async fn insert(&self, isbn: &str, author_id: i64) -> StoreResult<()> {
        let cmd = "INSERT INTO book_author (id_book, id_author) VALUES (?1, ?2)";
        debug!(sql = cmd, isbn, author_id, "inserting link");
        sqlx::query(cmd)
            .bind(isbn)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed)?;
        Ok(())
    }

    /// Remove the association for a book. Idempotent: deleting a
    /// missing link succeeds.
    pub async fn delete(&self, isbn: &str) -> StoreResult<()> {
        let cmd = "DELETE FROM book_author WHERE id_book = ?1";
        debug!(sql = cmd, isbn, "deleting link");
        sqlx::query(cmd)
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed)?;
        Ok(())
    }

    /// Full scan. Zero rows is an error, same as the other stores.
    pub async fn get_all(&self) -> StoreResult<Vec<BookAuthor>> {
        let cmd = "SELECT id_book, id_author FROM book_author";
        debug!(sql = cmd, "querying links");
        let links = sqlx::query_as::<_, BookAuthor>(cmd)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?;

        if links.is_empty() {
            return Err(StoreError::NotFound("book links"));
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::db;

    async fn test_store() -> LinkStore {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::apply_schema(&pool).await.unwrap();
        LinkStore::new(pool)
    }

    #[tokio::test]
    async fn test_duplicate_isbn_is_a_write_conflict() {
        let store = test_store().await;
        store.insert("123456789", 1).await.unwrap();

        let err = store.insert("123456789", 2).await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = test_store().await;
        store.insert("123456789", 1).await.unwrap();

        store.delete("123456789").await.unwrap();
        store.delete("123456789").await.unwrap();
        store.delete("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_get_all_on_empty_table_is_not_found() {
        let store = test_store().await;
        assert!(store.get_all().await.unwrap_err().is_not_found());

        store.insert("123456789", 1).await.unwrap();
        let links = store.get_all().await.unwrap();
        assert_eq!(
            links,
            vec![BookAuthor {
                id_book: "123456789".to_string(),
                id_author: 1,
            }]
        );
    }
}
