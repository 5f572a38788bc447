//! Route definitions for the parish booking HTTP API.
//!
//! All routes are mounted under `/api`. Staff routes live under
//! `/api/admin` and pass through the admin token check.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.body_limit_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(reservation_routes())
        .merge(catalog_routes())
        .merge(health_routes())
        .nest("/admin", admin_routes(state.clone()));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Public booking endpoints
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            post(handlers::reservations::create_reservation),
        )
        .route(
            "/reservations/available-times",
            get(handlers::reservations::available_times),
        )
        .route(
            "/reservations/code/{code}",
            get(handlers::reservations::get_by_code),
        )
}

/// Public catalog
fn catalog_routes() -> Router<AppState> {
    Router::new().route("/mass-types", get(handlers::mass_types::list_active))
}

/// Staff endpoints, gated by the admin token
fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::admin::{mass_types, reservations, slots};

    Router::new()
        .route("/reservations", get(reservations::list_reservations))
        .route("/reservations/stats", get(reservations::reservation_stats))
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::delete_reservation),
        )
        .route(
            "/slots",
            get(slots::list_slots).post(slots::create_slot),
        )
        .route("/slots/{id}", put(slots::update_slot))
        .route(
            "/mass-types",
            get(mass_types::list_mass_types).post(mass_types::create_mass_type),
        )
        .route("/mass-types/{code}", put(mass_types::update_mass_type))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin::require_admin,
        ))
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
