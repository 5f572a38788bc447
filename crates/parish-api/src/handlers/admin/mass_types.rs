//! Staff mass type catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use parish_entity::MassType;

use crate::dto::request::{CreateMassTypeRequest, UpdateMassTypeRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// GET /api/admin/mass-types
pub async fn list_mass_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MassType>>>, ApiError> {
    let mass_types = state.catalog.list_mass_types(false).await?;
    Ok(Json(ApiResponse::ok(mass_types)))
}

/// POST /api/admin/mass-types
pub async fn create_mass_type(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMassTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MassType>>), ApiError> {
    let mass_type = state.catalog.create_mass_type(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(mass_type))))
}

/// PUT /api/admin/mass-types/{code}
pub async fn update_mass_type(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ApiJson(req): ApiJson<UpdateMassTypeRequest>,
) -> Result<Json<ApiResponse<MassType>>, ApiError> {
    let mass_type = state.catalog.update_mass_type(&code, req.into()).await?;
    Ok(Json(ApiResponse::ok(mass_type)))
}
