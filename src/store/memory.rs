//! In-memory film store
//!
//! Keeps the table and its identifier counter behind one lock. Used as the
//! default backend and as the substitutable store in tests.

use super::models::{Film, FilmId, NewFilm};
use super::{FilmStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Table {
    films: BTreeMap<FilmId, Film>,
    next_id: FilmId,
}

/// Process-local film table
#[derive(Debug, Default)]
pub struct InMemoryFilmStore {
    table: RwLock<Table>,
}

impl InMemoryFilmStore {
    /// Create an empty store; the first film gets id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with fixture films
    ///
    /// Later ids continue after the highest seeded id.
    pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
        let films: BTreeMap<FilmId, Film> = films.into_iter().map(|f| (f.id, f)).collect();
        let next_id = films.keys().next_back().map_or(0, |id| id + 1);
        Self {
            table: RwLock::new(Table { films, next_id }),
        }
    }
}

#[async_trait]
impl FilmStore for InMemoryFilmStore {
    async fn get_all(&self) -> Result<Vec<Film>, StoreError> {
        let table = self.table.read().await;
        Ok(table.films.values().cloned().collect())
    }

    async fn put(&self, film: NewFilm) -> Result<Film, StoreError> {
        let mut table = self.table.write().await;
        let film = Film::from_new(table.next_id, film);
        table.films.insert(film.id, film.clone());
        table.next_id += 1;

        debug!("Stored film {} ({})", film.id, film.title);
        Ok(film)
    }

    async fn get(&self, id: FilmId) -> Result<Option<Film>, StoreError> {
        let table = self.table.read().await;
        Ok(table.films.get(&id).cloned())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.table.read().await.films.len())
    }
}
