//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::extractors::client::client_ip;

/// Logs request method, path, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip = client_ip(request.headers());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let client_ip = ip.as_deref().unwrap_or("unknown");

    if response.status().is_server_error() {
        warn!(%method, %path, status, duration_ms, client_ip, "HTTP request failed");
    } else {
        info!(%method, %path, status, duration_ms, client_ip, "HTTP request");
    }

    response
}
