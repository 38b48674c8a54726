//! Book HTTP Routes
//!
//! The `/api/v1` surface: lookups dispatched on query parameters and
//! batch writes taking a JSON list of books.
//!
//! Every response is HTTP 200 with a `{status, message}` envelope;
//! `status` is `"success"` or `"fail"` and failures carry the error
//! text in `message`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::service::BookService;
use crate::store::Book;

// ==================
// Shared State
// ==================

/// Book API state shared across handlers
pub struct BookApiState {
    pub service: BookService,
}

impl BookApiState {
    pub fn new(service: BookService) -> Self {
        Self { service }
    }
}

// ==================
// Request/Response Types
// ==================

/// The `{status, message}` response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: Value,
}

impl ApiResponse {
    pub fn success(message: impl Serialize) -> Self {
        match serde_json::to_value(message) {
            Ok(value) => Self {
                status: "success".to_string(),
                message: value,
            },
            Err(e) => Self::fail(e),
        }
    }

    pub fn fail(err: impl std::fmt::Display) -> Self {
        Self {
            status: "fail".to_string(),
            message: Value::String(err.to_string()),
        }
    }
}

/// Query parameters on `GET /books`: none for all books, or exactly
/// one of `isbn` / `author`
#[derive(Debug, Deserialize)]
pub struct BooksQuery {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Query parameters on `GET /books/range`
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
}

// ==================
// Book Routes
// ==================

/// Create book routes (nested under /api/v1)
pub fn book_routes(state: Arc<BookApiState>) -> Router {
    Router::new()
        .route("/books", get(get_books_handler))
        .route("/books/range", get(get_in_range_handler))
        .route("/books/add", post(insert_books_handler))
        .route("/books/update", post(update_books_handler))
        .route("/books/delete", delete(delete_books_handler))
        .with_state(state)
}

// ==================
// Read Handlers
// ==================

/// Dispatches on query parameters: `?isbn=` wins over `?author=`,
/// no parameters means all books.
async fn get_books_handler(
    State(state): State<Arc<BookApiState>>,
    Query(params): Query<BooksQuery>,
) -> Json<ApiResponse> {
    let response = if let Some(isbn) = params.isbn {
        info!(%isbn, "GET /api/v1/books?isbn");
        match state.service.get_by_isbn(&isbn).await {
            Ok(book) => ApiResponse::success(book),
            Err(e) => ApiResponse::fail(e),
        }
    } else if let Some(author) = params.author {
        info!(%author, "GET /api/v1/books?author");
        match state.service.get_by_author(&author).await {
            Ok(books) => ApiResponse::success(books),
            Err(e) => ApiResponse::fail(e),
        }
    } else {
        info!("GET /api/v1/books");
        match state.service.get_all_books().await {
            Ok(books) => ApiResponse::success(books),
            Err(e) => ApiResponse::fail(e),
        }
    };
    Json(response)
}

async fn get_in_range_handler(
    State(state): State<Arc<BookApiState>>,
    Query(params): Query<RangeQuery>,
) -> Json<ApiResponse> {
    info!("GET /api/v1/books/range");
    let (from, to) = match (params.from, params.to) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Json(ApiResponse::fail(
                "missing 'from' or 'to' query parameter",
            ))
        }
    };

    let response = match state.service.get_in_range(from, to).await {
        Ok(books) => ApiResponse::success(books),
        Err(e) => ApiResponse::fail(e),
    };
    Json(response)
}

// ==================
// Write Handlers
// ==================

async fn insert_books_handler(
    State(state): State<Arc<BookApiState>>,
    Json(books): Json<Vec<Book>>,
) -> Json<ApiResponse> {
    info!(count = books.len(), "POST /api/v1/books/add");
    let response = match state.service.insert(&books).await {
        Ok(()) => ApiResponse::success(""),
        Err(e) => ApiResponse::fail(e),
    };
    Json(response)
}

async fn update_books_handler(
    State(state): State<Arc<BookApiState>>,
    Json(books): Json<Vec<Book>>,
) -> Json<ApiResponse> {
    info!(count = books.len(), "POST /api/v1/books/update");
    let response = match state.service.update(&books).await {
        Ok(()) => ApiResponse::success(""),
        Err(e) => ApiResponse::fail(e),
    };
    Json(response)
}

async fn delete_books_handler(
    State(state): State<Arc<BookApiState>>,
    Json(books): Json<Vec<Book>>,
) -> Json<ApiResponse> {
    info!(count = books.len(), "DELETE /api/v1/books/delete");
    let response = match state.service.delete(&books).await {
        Ok(()) => ApiResponse::success(""),
        Err(e) => ApiResponse::fail(e),
    };
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_envelope_carries_the_error_text() {
        let response = ApiResponse::fail("no books found");
        assert_eq!(response.status, "fail");
        assert_eq!(response.message, Value::String("no books found".into()));
    }

    #[test]
    fn test_success_envelope_serializes_the_payload() {
        let response = ApiResponse::success(vec!["a", "b"]);
        assert_eq!(response.status, "success");
        assert_eq!(response.message, serde_json::json!(["a", "b"]));
    }
}
