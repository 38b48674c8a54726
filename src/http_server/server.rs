//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::BookService;
use crate::store::BookStore;

use super::book_routes::{book_routes, BookApiState};
use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP server for the catalog API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_config(pool, HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(pool: SqlitePool, config: HttpServerConfig) -> Self {
        let router = Self::build_router(pool, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(pool: SqlitePool, config: &HttpServerConfig) -> Router {
        let service = BookService::new(BookStore::from_pool(pool));
        let book_state = Arc::new(BookApiState::new(service));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // Health check at root level
            .merge(health_routes())
            // Book API under /api/v1
            .nest("/api/v1", book_routes(book_state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        info!(%addr, "starting libris HTTP server");
        info!("health check: http://{}/health", addr);
        info!("book API:     http://{}/api/v1/books", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
