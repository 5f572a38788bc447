//! Public reservation handlers: availability, booking, status lookup.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::{AvailableTimesQuery, CreateReservationRequest};
use crate::dto::response::{
    ApiResponse, AvailableTimesResponse, ReservationCreatedResponse, ReservationStatusView,
};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, ClientInfo, RawJson};
use crate::state::AppState;

/// GET /api/reservations/available-times?date=YYYY-MM-DD
pub async fn available_times(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AvailableTimesQuery>,
) -> Result<Json<AvailableTimesResponse>, ApiError> {
    let date = query.required_date()?;
    let day = state.availability.resolve_str(date).await?;
    Ok(Json(day.into()))
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    ClientInfo(ctx): ClientInfo,
    RawJson(req): RawJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationCreatedResponse>), ApiError> {
    let reservation = state.booking.book(req.into(), &ctx).await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /api/reservations/code/{code}
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<ReservationStatusView>>, ApiError> {
    let reservation = state.reservations.get_by_code(&code).await?;
    Ok(Json(ApiResponse::ok(reservation.into())))
}
