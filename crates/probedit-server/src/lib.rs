//! Probedit Server
//!
//! HTTP surface for the single problem record: read the latest problem and
//! overwrite its editable text.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use probedit_domain::ProblemStore;
use probedit_store::{SqliteStore, StoreError};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database could not be opened or seeded
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Open the configured database and insert the seed problem if it is empty
pub fn open_store(config: &ServerConfig) -> Result<SqliteStore, ServerError> {
    let mut store = SqliteStore::new(&config.database_path)?;

    if store.latest_problem()?.is_none() {
        match &config.seed_problem {
            Some(seed) => {
                let problem = store.insert_problem(seed, seed)?;
                info!("Seeded empty database with problem {}", problem.id);
            }
            None => warn!("Database has no problem record; reads will return 404 until one is inserted"),
        }
    }

    Ok(store)
}

/// Start the HTTP server
///
/// Opens the store, builds the router and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Probedit server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);

    let store = open_store(&config)?;
    let app = create_router(AppState::new(store));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config(seed: Option<&str>) -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 0,
            database_path: ":memory:".to_string(),
            seed_problem: seed.map(str::to_string),
        }
    }

    #[test]
    fn test_open_store_seeds_empty_database() {
        let store = open_store(&memory_config(Some("x^2"))).unwrap();
        let latest = store.latest_problem().unwrap().unwrap();

        assert_eq!(latest.source_problem, "x^2");
        assert_eq!(latest.editable_problem, "x^2");
    }

    #[test]
    fn test_open_store_without_seed() {
        let store = open_store(&memory_config(None)).unwrap();
        assert!(store.latest_problem().unwrap().is_none());
    }

    #[test]
    fn test_open_store_does_not_reseed() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config(Some("seed"));
        config.database_path = dir.path().join("p.db").to_string_lossy().into_owned();

        drop(open_store(&config).unwrap());
        let store = open_store(&config).unwrap();

        assert_eq!(store.count().unwrap(), 1);
    }
}
