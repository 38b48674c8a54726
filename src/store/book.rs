//! # Book Store
//!
//! The aggregate root over `book`, `book_author`, and `author`. Reads
//! always return a book with its author fully resolved (never a bare
//! author id); writes keep the book/link/author triple consistent
//! through the reconciliation sequence described on [`BookStore::insert`].
//!
//! None of the multi-statement writes run inside a transaction. A
//! failure partway through leaves the earlier statements applied and
//! surfaces as [`StoreError::PartialWrite`]; a concurrent reader can
//! observe a link-without-book or book-without-link state mid-write.
//! Both are accepted contracts, not bugs.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use super::author::{Author, AuthorStore};
use super::errors::{StoreError, StoreResult};
use super::link::LinkStore;

/// A catalog book with its embedded, fully resolved author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub name: String,
    pub publish_year: i64,
    pub author: Author,
}

/// One row of the book × link join, before author resolution
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    isbn: String,
    name: String,
    id_author: i64,
    publish_year: i64,
}

/// Aggregate store composing books, links, and authors
#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
    authors: AuthorStore,
    links: LinkStore,
}

impl BookStore {
    /// Collaborators come in through the constructor; there is no
    /// process-wide shared store handle.
    pub fn new(pool: SqlitePool, authors: AuthorStore, links: LinkStore) -> Self {
        Self {
            pool,
            authors,
            links,
        }
    }

    /// Convenience constructor wiring all three stores to one pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        let authors = AuthorStore::new(pool.clone());
        let links = LinkStore::new(pool.clone());
        Self::new(pool, authors, links)
    }

    pub fn authors(&self) -> &AuthorStore {
        &self.authors
    }

    async fn resolve(&self, row: BookRow) -> StoreResult<Book> {
        let author = self.authors.get_by_id(row.id_author).await?;
        Ok(Book {
            isbn: row.isbn,
            name: row.name,
            publish_year: row.publish_year,
            author,
        })
    }

    async fn resolve_all(&self, rows: Vec<BookRow>) -> StoreResult<Vec<Book>> {
        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(self.resolve(row).await?);
        }
        if books.is_empty() {
            return Err(StoreError::NotFound("books"));
        }
        Ok(books)
    }

    /// Every book, in storage order. Zero rows is an error.
    pub async fn get_all_books(&self) -> StoreResult<Vec<Book>> {
        let cmd = "SELECT b.isbn, b.name, ba.id_author, b.publish_year \
                   FROM book b JOIN book_author ba ON b.isbn = ba.id_book";
        debug!(sql = cmd, "querying books");
        let rows = sqlx::query_as::<_, BookRow>(cmd)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?;
        self.resolve_all(rows).await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> StoreResult<Book> {
        let cmd = "SELECT b.isbn, b.name, ba.id_author, b.publish_year \
                   FROM book b JOIN book_author ba ON b.isbn = ba.id_book \
                   WHERE b.isbn = ?1";
        debug!(sql = cmd, isbn, "querying book by isbn");
        let row = sqlx::query_as::<_, BookRow>(cmd)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?
            .ok_or(StoreError::NotFound("book"))?;
        self.resolve(row).await
    }

    /// Books whose author matches `author_name` exactly. Each returned
    /// book carries the resolved author record, not just the name the
    /// filter matched on.
    pub async fn get_by_author(&self, author_name: &str) -> StoreResult<Vec<Book>> {
        let cmd = "SELECT b.isbn, b.name, ba.id_author, b.publish_year \
                   FROM book b JOIN book_author ba ON b.isbn = ba.id_book \
                   JOIN author a ON ba.id_author = a.id \
                   WHERE a.name = ?1";
        debug!(sql = cmd, author_name, "querying books by author");
        let rows = sqlx::query_as::<_, BookRow>(cmd)
            .bind(author_name)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?;
        self.resolve_all(rows).await
    }

    /// Books with `year_low <= publish_year <= year_high`, inclusive on
    /// both bounds.
    pub async fn get_in_range(&self, year_low: i64, year_high: i64) -> StoreResult<Vec<Book>> {
        let cmd = "SELECT b.isbn, b.name, ba.id_author, b.publish_year \
                   FROM book b JOIN book_author ba ON b.isbn = ba.id_book \
                   WHERE b.publish_year >= ?1 AND b.publish_year <= ?2";
        debug!(sql = cmd, year_low, year_high, "querying books in range");
        let rows = sqlx::query_as::<_, BookRow>(cmd)
            .bind(year_low)
            .bind(year_high)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::QueryFailed)?;
        self.resolve_all(rows).await
    }

    /// Insert a book, reconciling its embedded author by name:
    ///
    /// 1. Look the author up by name.
    /// 2. If absent, insert one from the embedded name/birth_date.
    /// 3. Re-fetch by name for the authoritative id (covers the
    ///    pre-existing and newly-created cases uniformly).
    /// 4. Insert the book row.
    /// 5. Insert the link row.
    ///
    /// No transaction wraps the sequence: if step 4 or 5 fails, the
    /// earlier steps stay applied and the failure surfaces as
    /// [`StoreError::PartialWrite`].
    pub async fn insert(&self, book: &Book) -> StoreResult<Book> {
        match self.authors.get_by_name(&book.author.name).await {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                self.authors
                    .insert(&book.author.name, &book.author.birth_date)
                    .await?;
            }
            Err(e) => return Err(e),
        }
        let author = self.authors.get_by_name(&book.author.name).await?;

        let cmd = "INSERT INTO book (isbn, name, publish_year) VALUES (?1, ?2, ?3)";
        debug!(sql = cmd, isbn = %book.isbn, "inserting book");
        sqlx::query(cmd)
            .bind(&book.isbn)
            .bind(&book.name)
            .bind(book.publish_year)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::PartialWrite {
                step: "book",
                source: Box::new(StoreError::WriteFailed(e)),
            })?;

        self.links
            .insert(&book.isbn, author.id)
            .await
            .map_err(|e| StoreError::PartialWrite {
                step: "link",
                source: Box::new(e),
            })?;

        Ok(Book {
            isbn: book.isbn.clone(),
            name: book.name.clone(),
            publish_year: book.publish_year,
            author,
        })
    }

    /// Update name/publish_year on the row identified by `isbn`. The
    /// author link is left untouched; the embedded author on the input
    /// is ignored.
    pub async fn update(&self, book: &Book) -> StoreResult<()> {
        let cmd = "UPDATE book SET name = ?1, publish_year = ?2 WHERE isbn = ?3";
        debug!(sql = cmd, isbn = %book.isbn, "updating book");
        sqlx::query(cmd)
            .bind(&book.name)
            .bind(book.publish_year)
            .bind(&book.isbn)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed)?;
        Ok(())
    }

    /// Delete the link row first, then the book row. Best effort: a
    /// link failure does not stop the book delete, and a book failure
    /// after the link was removed leaves the book orphaned.
    pub async fn delete(&self, book: &Book) -> StoreResult<()> {
        let link_result = self.links.delete(&book.isbn).await;

        let cmd = "DELETE FROM book WHERE isbn = ?1";
        debug!(sql = cmd, isbn = %book.isbn, "deleting book");
        let book_result = sqlx::query(cmd)
            .bind(&book.isbn)
            .execute(&self.pool)
            .await
            .map_err(StoreError::WriteFailed);

        match (link_result, book_result) {
            (Ok(()), Ok(_)) => Ok(()),
            // The first error wins; the book delete was still attempted.
            (Err(e), _) => Err(e),
            (Ok(()), Err(e)) => Err(StoreError::PartialWrite {
                step: "book",
                source: Box::new(e),
            }),
        }
    }
}
