//! Film persistence
//!
//! The [`FilmStore`] trait is the key-value table contract the API layer is
//! written against. Stores own their identifier counter so each instance is
//! isolated from every other.

pub mod memory;
pub mod models;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryFilmStore;
pub use models::{Film, FilmId, NewFilm};
pub use sqlite::SqliteFilmStore;

/// Errors raised by a film store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    /// Stored data could not be mapped back to a film
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Key-value table of films addressed by [`FilmId`]
///
/// `put` assigns identifiers from a counter starting at 0. Implementations
/// must serialize assignment so concurrent inserts never share an id and
/// the counter only advances when an insert succeeds.
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// All films in the store's native retrieval order (ascending id)
    async fn get_all(&self) -> Result<Vec<Film>, StoreError>;

    /// Store a new film under the next identifier and return it
    async fn put(&self, film: NewFilm) -> Result<Film, StoreError>;

    /// Look up a single film
    async fn get(&self, id: FilmId) -> Result<Option<Film>, StoreError>;

    /// Number of films stored
    async fn len(&self) -> Result<usize, StoreError>;

    /// Whether the store holds no films
    async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }
}
