//! Admin token gate for the staff router.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extractors::AdminAccess;

/// Runs the inner service only when [`AdminAccess`] could be extracted.
pub async fn require_admin(_access: AdminAccess, request: Request, next: Next) -> Response {
    next.run(request).await
}
