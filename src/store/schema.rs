//! Catalog table definitions.
//!
//! No foreign keys: the link table is kept consistent by the book
//! store's write sequence, not by the engine. `UNIQUE(id_book)` pins
//! the link table to one author per book.

pub const CREATE_AUTHOR: &str = r#"
CREATE TABLE IF NOT EXISTS author (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    birth_date TEXT NOT NULL
);
"#;

pub const CREATE_BOOK: &str = r#"
CREATE TABLE IF NOT EXISTS book (
    isbn TEXT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    publish_year INTEGER NOT NULL
);
"#;

pub const CREATE_BOOK_AUTHOR: &str = r#"
CREATE TABLE IF NOT EXISTS book_author (
    id_book TEXT NOT NULL UNIQUE,
    id_author INTEGER NOT NULL
);
"#;

/// All schema statements, in creation order
pub const TABLES: [&str; 3] = [CREATE_AUTHOR, CREATE_BOOK, CREATE_BOOK_AUTHOR];
