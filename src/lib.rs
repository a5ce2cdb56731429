//! Films API Library
//!
//! A small REST service managing a collection of films backed by a
//! key-value table. The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state shared by request handlers
pub mod state;
pub mod store;

use config::{StoreBackend, StoreConfig};
use std::sync::Arc;
use store::{FilmStore, InMemoryFilmStore, SqliteFilmStore, StoreError};
use tracing::info;

/// Open the film store selected by the configuration
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn FilmStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory film store");
            Ok(Arc::new(InMemoryFilmStore::new()))
        }
        StoreBackend::Sqlite => {
            info!("Using SQLite film store at {}", config.database_url);
            let store = SqliteFilmStore::open(&config.database_url, &config.table).await?;
            Ok(Arc::new(store))
        }
    }
}
