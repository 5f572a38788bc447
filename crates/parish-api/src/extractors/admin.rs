//! `AdminAccess` extractor: checks the static bearer token on staff routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use parish_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::client::client_ip;
use crate::state::AppState;

/// Proof that the caller presented the admin token, or that no token is
/// configured.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.admin.is_protected() {
            return Ok(Self);
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Missing or malformed Authorization header"))?;

        if bearer.token() != state.config.admin.api_token.trim() {
            tracing::warn!(
                path = %parts.uri.path(),
                client_ip = client_ip(&parts.headers).as_deref().unwrap_or("unknown"),
                "Rejected admin request with wrong token"
            );
            return Err(AppError::unauthorized("Invalid admin token").into());
        }

        Ok(Self)
    }
}
