//! Administrative access configuration.

use serde::{Deserialize, Serialize};

/// Access control for the staff routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Static bearer token required on `/api/admin/*`. Empty disables the
    /// check.
    #[serde(default)]
    pub api_token: String,
}

impl AdminConfig {
    /// Whether admin routes are protected.
    pub fn is_protected(&self) -> bool {
        !self.api_token.trim().is_empty()
    }
}
