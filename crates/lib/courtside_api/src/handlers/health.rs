//! Health check.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /api/health`: liveness check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: courtside_core::version().into(),
    })
}
