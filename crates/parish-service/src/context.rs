//! Request provenance passed into service methods.

use serde::{Deserialize, Serialize};

/// Who sent the request, as far as the HTTP layer can tell.
///
/// Booking copies it onto the reservation; staff operations attach it to
/// audit events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// Client address, from `x-forwarded-for`, `x-real-ip` or the socket.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }

    /// Client address for logging, `"unknown"` when absent.
    pub fn ip_or_unknown(&self) -> &str {
        self.ip_address.as_deref().unwrap_or("unknown")
    }
}
