//! Public mass type catalog.

use axum::Json;
use axum::extract::State;

use parish_entity::MassType;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/mass-types
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MassType>>>, ApiError> {
    let mass_types = state.catalog.list_mass_types(true).await?;
    Ok(Json(ApiResponse::ok(mass_types)))
}
