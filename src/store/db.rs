//! Connection pool setup and schema application.

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::errors::{StoreError, StoreResult};
use super::schema;

/// Open a pooled connection to the database named by `url`
/// (e.g. `sqlite:libris.db?mode=rwc`, or `sqlite::memory:` for tests).
pub async fn connect(url: &str) -> StoreResult<SqlitePool> {
    // An in-memory database exists per connection, so the pool must
    // stay at one connection for it to behave like one database.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(url)
        .await
        .map_err(StoreError::QueryFailed)?;

    tracing::debug!(url, "connected to database");
    Ok(pool)
}

/// Create the catalog tables if they do not exist yet.
pub async fn apply_schema(pool: &SqlitePool) -> StoreResult<()> {
    for statement in schema::TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(StoreError::WriteFailed)?;
    }
    tracing::debug!("schema applied");
    Ok(())
}
