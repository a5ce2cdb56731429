//! Film API handlers
//!
//! Contains HTTP request handlers for listing, creating and reading films.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{Film, FilmId, NewFilm};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::info;

/// GET /api/films - List all films
pub async fn list_films(State(state): State<AppState>) -> Result<Json<Vec<Film>>, AppError> {
    let films = state.store.get_all().await?;
    Ok(Json(films))
}

/// POST /api/films - Create a new film
///
/// An empty, absent or malformed body is a validation error.
pub async fn create_film(
    State(state): State<AppState>,
    payload: Result<Json<NewFilm>, JsonRejection>,
) -> Result<(StatusCode, Json<Film>), AppError> {
    let Json(film) = payload?;
    film.validate().map_err(AppError::Validation)?;

    let film = state.store.put(film).await?;
    info!("Created film {} ({})", film.id, film.title);

    Ok((StatusCode::CREATED, Json(film)))
}

/// GET /api/films/:id - Get a specific film
pub async fn get_film(
    State(state): State<AppState>,
    path: Result<Path<FilmId>, PathRejection>,
) -> Result<Json<Film>, AppError> {
    let Path(id) = path?;
    let film = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::FilmNotFound(id))?;

    Ok(Json(film))
}
