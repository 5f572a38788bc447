//! Health check handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DetailedHealthResponse>>, ApiError> {
    let response = match &state.db {
        Some(db) => {
            let start = Instant::now();
            db.health_check().await?;
            DetailedHealthResponse {
                status: "ok".to_string(),
                database: "connected".to_string(),
                database_latency_ms: Some(start.elapsed().as_millis() as u64),
            }
        }
        None => DetailedHealthResponse {
            status: "ok".to_string(),
            database: "in-memory".to_string(),
            database_latency_ms: None,
        },
    };
    Ok(Json(ApiResponse::ok(response)))
}
