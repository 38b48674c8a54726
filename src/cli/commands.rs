//! CLI command implementations
//!
//! Commands are synchronous from main's point of view; a tokio runtime
//! is created here and everything async runs inside it.

use std::path::Path;

use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::service::BookService;
use crate::store::{self, Author, Book, BookStore};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments, set up logging, and dispatch to a command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_command(cli.command))
}

/// Dispatch a parsed command.
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config).await,
        Command::Seed { config } => seed(&config).await,
        Command::Start { config } => start(&config).await,
    }
}

async fn open(config_path: &Path) -> CliResult<(AppConfig, SqlitePool)> {
    let config = AppConfig::load(config_path)?;
    let pool = store::connect(&config.database_url).await?;
    store::apply_schema(&pool).await?;
    Ok((config, pool))
}

/// `libris init` - create the catalog schema
pub async fn init(config_path: &Path) -> CliResult<()> {
    let (config, _pool) = open(config_path).await?;
    info!(url = %config.database_url, "schema created");
    Ok(())
}

/// `libris seed` - load the demo catalog through the reconciliation
/// path, so authors and links come out the same way API writes produce
/// them.
pub async fn seed(config_path: &Path) -> CliResult<()> {
    let (_config, pool) = open(config_path).await?;
    let service = BookService::new(BookStore::from_pool(pool));

    service.insert(&demo_catalog()).await?;
    info!("demo catalog loaded");
    Ok(())
}

/// `libris start` - boot the HTTP server
pub async fn start(config_path: &Path) -> CliResult<()> {
    let (config, pool) = open(config_path).await?;
    let server = HttpServer::with_config(pool, config.http);
    server.start().await?;
    Ok(())
}

fn demo_catalog() -> Vec<Book> {
    let book = |isbn: &str, name: &str, year: i64, author: &str, born: &str| Book {
        isbn: isbn.to_string(),
        name: name.to_string(),
        publish_year: year,
        author: Author {
            id: 0,
            name: author.to_string(),
            birth_date: born.to_string(),
        },
    };

    vec![
        book("133", "Abcyx", 2021, "a1", "01-01-1980"),
        book("129", "Bo", 2009, "a10", "05-03-1964"),
        book("273", "Atomic", 2010, "a2", "22-11-1975"),
        book("103", "Atomic 3", 2023, "a4", "17-04-2002"),
    ]
}
