//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (verifies a remote session can be established)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.crm.ready().await?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
