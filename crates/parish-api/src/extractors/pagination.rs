//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use parish_core::types::pagination::{DEFAULT_LIMIT, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Items per page (default: 25, max: 100).
    pub limit: Option<u64>,
    /// Items to skip (default: 0).
    pub offset: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(
            self.limit.unwrap_or(DEFAULT_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}
