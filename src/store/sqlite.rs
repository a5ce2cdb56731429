//! SQLite film store
//!
//! Persists films in a single table. The identifier counter is loaded from
//! the table when the store is opened and held in memory afterwards.

use super::models::{Film, FilmId, FilmRow, NewFilm};
use super::{FilmStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Film table backed by a SQLite database
pub struct SqliteFilmStore {
    pool: SqlitePool,
    table: String,
    /// Next identifier to assign; the lock also serializes inserts
    next_id: Mutex<FilmId>,
}

impl SqliteFilmStore {
    /// Connect to the database and make sure the films table exists
    ///
    /// # Arguments
    /// * `db_url` - Path to the database file, or a `sqlite:` URL
    /// * `table` - Name of the films table
    ///
    /// # Returns
    /// * `Ok(SqliteFilmStore)` if successful
    /// * `Err(StoreError)` if the table name is invalid or connecting failed
    pub async fn open(db_url: &str, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;

        let connection_string = if db_url.starts_with("sqlite:") {
            db_url.to_string()
        } else {
            if let Some(parent) = Path::new(db_url).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
                }
            }
            format!("sqlite:{}", db_url)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_url);

        create_table_if_not_exists(&pool, table).await?;

        let max_id: Option<i64> = sqlx::query_scalar(&format!("SELECT MAX(id) FROM {}", table))
            .fetch_one(&pool)
            .await?;
        let next_id = match max_id {
            Some(id) => FilmId::try_from(id)
                .map(|id| id + 1)
                .map_err(|_| StoreError::Corrupt(format!("negative film id {}", id)))?,
            None => 0,
        };

        info!("Films table '{}' ready, next id {}", table, next_id);

        Ok(Self {
            pool,
            table: table.to_string(),
            next_id: Mutex::new(next_id),
        })
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Create the films table unless it already exists
pub async fn create_table_if_not_exists(pool: &SqlitePool, table: &str) -> Result<(), StoreError> {
    validate_table_name(table)?;

    let migration_sql = include_str!("../../migrations/001_create_films.sql");

    // Drop comments before running; the file holds a single statement
    let statement: String = migration_sql
        .lines()
        .map(|line| match line.find("--") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join(" ")
        .replace("{table}", table);

    sqlx::query(statement.trim()).execute(pool).await?;

    debug!("Ensured films table '{}' exists", table);
    Ok(())
}

/// Table names are interpolated into SQL, so only plain identifiers pass
fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}

#[async_trait]
impl FilmStore for SqliteFilmStore {
    async fn get_all(&self) -> Result<Vec<Film>, StoreError> {
        let rows = sqlx::query_as::<_, FilmRow>(&format!(
            "SELECT id, title, year, director FROM {} ORDER BY id ASC",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Film::try_from).collect()
    }

    async fn put(&self, film: NewFilm) -> Result<Film, StoreError> {
        let mut next_id = self.next_id.lock().await;
        let film = Film::from_new(*next_id, film);
        let id = i64::try_from(film.id)
            .map_err(|_| StoreError::Corrupt(format!("film id {} out of range", film.id)))?;

        sqlx::query(&format!(
            "INSERT INTO {} (id, title, year, director) VALUES (?, ?, ?, ?)",
            self.table
        ))
        .bind(id)
        .bind(&film.title)
        .bind(film.year)
        .bind(&film.director)
        .execute(&self.pool)
        .await?;

        *next_id += 1;

        debug!("Stored film {} ({})", film.id, film.title);
        Ok(film)
    }

    async fn get(&self, id: FilmId) -> Result<Option<Film>, StoreError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, FilmRow>(&format!(
            "SELECT id, title, year, director FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Film::try_from).transpose()
    }

    async fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;

        usize::try_from(count).map_err(|_| StoreError::Corrupt(format!("row count {}", count)))
    }
}
