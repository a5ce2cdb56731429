//! Health check handler

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status indicator
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable message
    pub message: String,
}

/// GET /api/health - Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Films API is healthy".to_string(),
    })
}
