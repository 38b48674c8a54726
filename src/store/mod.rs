//! # Relational stores
//!
//! CRUD access to the three catalog tables:
//!
//! - `author` — [`AuthorStore`]
//! - `book` — [`BookStore`] (the aggregate root: reads resolve the
//!   embedded author, writes maintain the book/link/author triple)
//! - `book_author` — [`LinkStore`] (one link row per book)
//!
//! Callers never touch link rows directly; the book store owns their
//! lifecycle as a side effect of book writes.

pub mod author;
pub mod book;
pub mod db;
pub mod errors;
pub mod link;
pub mod schema;

pub use author::{Author, AuthorStore};
pub use book::{Book, BookStore};
pub use db::{apply_schema, connect};
pub use errors::{StoreError, StoreResult};
pub use link::{BookAuthor, LinkStore};
