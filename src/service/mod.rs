//! # Service layer
//!
//! Batch orchestration between the HTTP routes and the book store.

pub mod book_service;

pub use book_service::BookService;
