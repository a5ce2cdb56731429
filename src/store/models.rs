//! Film data models
//!
//! Defines the persisted film record and the payload used to create one.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::StoreError;

/// Unique identifier for a film, assigned by the store
pub type FilmId = u64;

/// A persisted film record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Identifier assigned by the store on insert
    pub id: FilmId,
    /// Title of the film
    pub title: String,
    /// Release year
    pub year: i32,
    /// Director of the film
    pub director: String,
}

impl Film {
    /// Attach an identifier to a new film
    pub fn from_new(id: FilmId, film: NewFilm) -> Self {
        Self {
            id,
            title: film.title,
            year: film.year,
            director: film.director,
        }
    }
}

/// A film that has not been stored yet
///
/// Deserialized from create requests. An `id` supplied by the client is
/// ignored since the store owns identifier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFilm {
    /// Title of the film
    pub title: String,
    /// Release year
    pub year: i32,
    /// Director of the film
    pub director: String,
}

impl NewFilm {
    /// Create a new film payload
    pub fn new(title: impl Into<String>, year: i32, director: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year,
            director: director.into(),
        }
    }

    /// Validate the film before it is stored
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Film title cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Row layout of the films table
///
/// SQLite integers are signed, so ids are checked on the way out.
#[derive(Debug, FromRow)]
pub struct FilmRow {
    /// Stored identifier
    pub id: i64,
    /// Title of the film
    pub title: String,
    /// Release year
    pub year: i32,
    /// Director of the film
    pub director: String,
}

impl TryFrom<FilmRow> for Film {
    type Error = StoreError;

    fn try_from(row: FilmRow) -> Result<Self, Self::Error> {
        let id = FilmId::try_from(row.id)
            .map_err(|_| StoreError::Corrupt(format!("negative film id {}", row.id)))?;
        Ok(Self {
            id,
            title: row.title,
            year: row.year,
            director: row.director,
        })
    }
}
