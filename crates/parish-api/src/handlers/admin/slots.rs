//! Staff slot catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use parish_core::types::SlotId;
use parish_entity::Slot;

use crate::dto::request::{CreateSlotRequest, SlotListQuery, UpdateSlotRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, parse_id};
use crate::state::AppState;

/// GET /api/admin/slots?dayType=
pub async fn list_slots(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SlotListQuery>,
) -> Result<Json<ApiResponse<Vec<Slot>>>, ApiError> {
    let slots = state.catalog.list_slots(query.day_type()?).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// POST /api/admin/slots
pub async fn create_slot(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Slot>>), ApiError> {
    let slot = state.catalog.create_slot(req.into_create()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(slot))))
}

/// PUT /api/admin/slots/{id}
pub async fn update_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSlotRequest>,
) -> Result<Json<ApiResponse<Slot>>, ApiError> {
    let id: SlotId = parse_id(&id, "slot")?;
    let slot = state.catalog.update_slot(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(slot)))
}
