//! Staff reservation handlers.

use axum::Json;
use axum::extract::{Path, State};

use parish_core::types::{PageResponse, ReservationId};
use parish_entity::Reservation;

use crate::dto::request::{ReservationListQuery, UpdateReservationRequest};
use crate::dto::response::{ApiResponse, DeletedReservation, MessageResponse, ReservationStats};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, ClientInfo, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/admin/reservations?status=&date=&limit=&offset=
pub async fn list_reservations(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReservationListQuery>,
    ApiQuery(page): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Reservation>>>, ApiError> {
    let filter = query.into_filter()?;
    let result = state
        .reservations
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/reservations/stats
pub async fn reservation_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReservationStats>>, ApiError> {
    let counts = state.reservations.stats().await?;
    Ok(Json(ApiResponse::ok(counts.into())))
}

/// GET /api/admin/reservations/{id}
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let id: ReservationId = parse_id(&id, "reservation")?;
    let reservation = state.reservations.get(id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// PUT /api/admin/reservations/{id}
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ClientInfo(ctx): ClientInfo,
    ApiJson(req): ApiJson<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let id: ReservationId = parse_id(&id, "reservation")?;
    let update = req.into_update()?;
    let reservation = state.reservations.update(id, update, &ctx).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// DELETE /api/admin/reservations/{id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ClientInfo(ctx): ClientInfo,
) -> Result<Json<MessageResponse<DeletedReservation>>, ApiError> {
    let id: ReservationId = parse_id(&id, "reservation")?;
    let removed = state.reservations.delete(id, &ctx).await?;
    Ok(Json(MessageResponse::ok(
        "Reservation deleted",
        DeletedReservation {
            id: removed.id,
            confirmation_code: removed.confirmation_code,
        },
    )))
}
