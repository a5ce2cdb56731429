// Application state management
// Owns the injected film store handle

use crate::store::{FilmStore, InMemoryFilmStore};
use std::sync::Arc;

/// Main application state
/// Cloned into every handler; clones share the same store
#[derive(Clone)]
pub struct AppState {
    /// Backing film store
    pub store: Arc<dyn FilmStore>,
}

impl AppState {
    /// Create application state around an existing store
    pub fn new(store: Arc<dyn FilmStore>) -> Self {
        Self { store }
    }

    /// Create application state with a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryFilmStore::new()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
