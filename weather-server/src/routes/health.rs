//! Liveness probe.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET / — always healthy, independent of provider configuration.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy", service: "weather-api" })
}
