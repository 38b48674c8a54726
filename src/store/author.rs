//! # Author Store
//!
//! CRUD over the `author` table. `id` is the identity; `name` is the
//! secondary lookup key that book writes reconcile against (exact
//! match, uniqueness not enforced).

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use super::errors::{StoreError, StoreResult};

/// A persisted author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    /// Store-assigned id; requests may omit it
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub birth_date: String,
}

/// Store for author records, shared through a pooled connection
#[derive(Debug, Clone)]
pub struct AuthorStore {
    pool: SqlitePool,
}

impl AuthorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every author, in insertion order. Zero rows is an error.
    pub async fn get_all(&self) -> StoreResult<Vec<Author>> {
        let cmd = "SELECT id, name, birth_date FROM author";
        debug!(sql = cmd, "querying authors");
        let authors = sqlx::query_as::<_, Author>(cmd)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?;

        if authors.is_empty() {
            return Err(StoreError::NotFound("authors"));
        }
        Ok(authors)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Author> {
        let cmd = "SELECT id, name, birth_date FROM author WHERE id = ?1";
        debug!(sql = cmd, id, "querying author by id");
        sqlx::query_as::<_, Author>(cmd)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?
            .ok_or(StoreError::NotFound("author"))
    }

    /// Exact-match lookup by name — the reconciliation key for book
    /// writes.
    pub async fn get_by_name(&self, name: &str) -> StoreResult<Author> {
        let cmd = "SELECT id, name, birth_date FROM author WHERE name = ?1";
        debug!(sql = cmd, name, "querying author by name");
        sqlx::query_as::<_, Author>(cmd)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?
            .ok_or(StoreError::NotFound("author"))
    }

    /// Insert a new author and return it with its assigned id.
    pub async fn insert(&self, name: &str, birth_date: &str) -> StoreResult<Author> {
        let cmd = "INSERT INTO author (name, birth_date) VALUES (?1, ?2)";
        debug!(sql = cmd, name, "inserting author");
        let result = sqlx::query(cmd)
            .bind(name)
            .bind(birth_date)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed)?;

        Ok(Author {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            birth_date: birth_date.to_string(),
        })
    }

    /// Replace name/birth_date for an existing id. Updating a missing
    /// id is a silent no-op: the affected-row count is deliberately not
    /// checked.
    pub async fn update(&self, author: &Author) -> StoreResult<()> {
        let cmd = "UPDATE author SET name = ?1, birth_date = ?2 WHERE id = ?3";
        debug!(sql = cmd, author.id, "updating author");
        sqlx::query(cmd)
            .bind(&author.name)
            .bind(&author.birth_date)
            .bind(author.id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed)?;
        Ok(())
    }
}
