//! # HTTP Server Module
//!
//! Axum-based API server for the catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/books` - Book lookups (all / by isbn / by author)
//! - `/api/v1/books/range` - Books in an inclusive publish-year range
//! - `/api/v1/books/add|update|delete` - Batch writes

pub mod book_routes;
pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
