//! # parish-api
//!
//! HTTP API layer for the parish booking service built on Axum.
//!
//! Provides the public booking endpoints, the staff endpoints behind the
//! admin token, health checks, middleware, extractors, DTOs and the mapping
//! from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::{AppState, Stores};
