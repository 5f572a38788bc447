//! Limit/offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_LIMIT: u64 = 25;
/// Maximum page size.
pub const MAX_LIMIT: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to return.
    pub limit: u64,
    /// Number of items to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the limit into `1..=MAX_LIMIT`.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// The SQL `LIMIT` value.
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }

    /// The SQL `OFFSET` value.
    pub fn offset_i64(&self) -> i64 {
        self.offset.min(i64::MAX as u64) as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items matching the query.
    pub total: u64,
    /// Limit that produced this page.
    pub limit: u64,
    /// Offset that produced this page.
    pub offset: u64,
    /// Whether more items follow this page.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let has_more = page.offset + (items.len() as u64) < total;
        Self {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
            has_more,
        }
    }
}
