//! Application configuration.
//!
//! Loaded from a JSON file (default `./libris.json`); missing file
//! means defaults. `DATABASE_URL` from the environment (or a `.env`
//! file) overrides the configured database url either way.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Configuration load errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database url (default: `sqlite:libris.db?mode=rwc`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_url() -> String {
    "sqlite:libris.db?mode=rwc".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            http: HttpServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, then apply the environment
    /// override.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // A missing .env file is fine; only an explicit DATABASE_URL wins.
        let _ = dotenvy::dotenv();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }
}
