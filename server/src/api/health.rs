//! Liveness probe.

use axum::extract::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Timestamp of the check.
    pub timestamp: DateTime<Utc>,
}

/// GET /health
///
/// Returns basic health status of the service.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
