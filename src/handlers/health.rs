// src/handlers/health.rs

use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::response::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is healthy", body = HealthStatus))
)]
pub async fn health_check() -> impl IntoResponse {
    ApiResponse::success(
        HealthStatus {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        "Service is healthy",
    )
}
