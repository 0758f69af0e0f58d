//! Health check handlers for service monitoring.
//!
//! Liveness and readiness are trivially affirmative: the service holds no
//! connections to warm up, and the note store is only reachable per-request.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status.
    pub status: &'static str,
    /// Timestamp when the health check was performed.
    pub timestamp: DateTime<Utc>,
    /// Service version information.
    pub version: String,
}

/// Primary health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: state.clock.now_utc(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness probe: the process is running.
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe: the service can accept requests.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
