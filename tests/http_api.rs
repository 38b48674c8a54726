//! HTTP API envelope tests
//!
//! Drives the built router directly with tower's `oneshot`:
//! - every response is HTTP 200; success/failure lives in the body
//! - the `{status, message}` envelope and the book JSON shape
//! - query-parameter dispatch on GET /api/v1/books

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use libris::http_server::HttpServer;
use libris::store::db;

// =============================================================================
// Test Utilities
// =============================================================================

async fn test_router() -> Router {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    db::apply_schema(&pool).await.unwrap();
    HttpServer::new(pool).router()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200, "every API response is HTTP 200");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn book_json(isbn: &str, name: &str, year: i64, author: &str) -> Value {
    json!({
        "isbn": isbn,
        "name": name,
        "publish_year": year,
        "author": {"name": author, "birth_date": "17-04-2002"},
    })
}

// =============================================================================
// Envelope
// =============================================================================

#[tokio::test]
async fn test_empty_catalog_fails_inside_the_envelope() {
    let router = test_router().await;

    let body = send(&router, "GET", "/api/v1/books", None).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "no books found");
}

#[tokio::test]
async fn test_add_then_get_round_trip() {
    let router = test_router().await;

    let body = send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([book_json("123456789", "Name", 2024, "Author")])),
    )
    .await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "");

    let body = send(&router, "GET", "/api/v1/books?isbn=123456789", None).await;
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        json!({
            "isbn": "123456789",
            "name": "Name",
            "publish_year": 2024,
            "author": {"id": 1, "name": "Author", "birth_date": "17-04-2002"},
        })
    );
}

#[tokio::test]
async fn test_missing_isbn_fails_inside_the_envelope() {
    let router = test_router().await;

    let body = send(&router, "GET", "/api/v1/books?isbn=nope", None).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "no book found");
}

// =============================================================================
// Query dispatch
// =============================================================================

#[tokio::test]
async fn test_author_query_returns_that_authors_books() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([
            book_json("111", "One", 1998, "Author"),
            book_json("222", "Two", 2001, "Author"),
            book_json("333", "Other", 2010, "Someone Else"),
        ])),
    )
    .await;

    let body = send(&router, "GET", "/api/v1/books?author=Author", None).await;
    assert_eq!(body["status"], "success");
    let books = body["message"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert!(books.iter().all(|b| b["author"]["name"] == "Author"));

    let body = send(&router, "GET", "/api/v1/books", None).await;
    assert_eq!(body["message"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_range_is_inclusive_and_validates_params() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([
            book_json("a", "A", 1998, "X"),
            book_json("b", "B", 2001, "X"),
            book_json("c", "C", 2022, "X"),
        ])),
    )
    .await;

    let body = send(&router, "GET", "/api/v1/books/range?from=1999&to=2023", None).await;
    assert_eq!(body["status"], "success");
    let years: Vec<i64> = body["message"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["publish_year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2001, 2022]);

    let body = send(&router, "GET", "/api/v1/books/range?from=1999", None).await;
    assert_eq!(body["status"], "fail");
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_update_changes_name_and_year_only() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([book_json("111", "One", 1998, "Author")])),
    )
    .await;

    let body = send(
        &router,
        "POST",
        "/api/v1/books/update",
        Some(json!([book_json("111", "One, Revised", 2003, "Author")])),
    )
    .await;
    assert_eq!(body["status"], "success");

    let body = send(&router, "GET", "/api/v1/books?isbn=111", None).await;
    assert_eq!(body["message"]["name"], "One, Revised");
    assert_eq!(body["message"]["publish_year"], 2003);
    assert_eq!(body["message"]["author"]["id"], 1);
}

#[tokio::test]
async fn test_delete_removes_the_book() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([book_json("111", "One", 1998, "Author")])),
    )
    .await;

    let body = send(
        &router,
        "DELETE",
        "/api/v1/books/delete",
        Some(json!([book_json("111", "One", 1998, "Author")])),
    )
    .await;
    assert_eq!(body["status"], "success");

    let body = send(&router, "GET", "/api/v1/books?isbn=111", None).await;
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_duplicate_add_fails_but_later_items_land() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([book_json("111", "One", 1998, "A")])),
    )
    .await;

    let body = send(
        &router,
        "POST",
        "/api/v1/books/add",
        Some(json!([
            book_json("111", "Dup", 1999, "A"),
            book_json("222", "Two", 2001, "A"),
        ])),
    )
    .await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "book 111 already exists");

    let body = send(&router, "GET", "/api/v1/books?isbn=222", None).await;
    assert_eq!(body["status"], "success");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = test_router().await;

    let body = send(&router, "GET", "/health", None).await;
    assert_eq!(body["status"], "ok");
}
