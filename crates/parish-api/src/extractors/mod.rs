//! Custom Axum extractors.

pub mod admin;
pub mod client;
pub mod json;
pub mod pagination;
pub mod path;

pub use admin::AdminAccess;
pub use client::ClientInfo;
pub use json::{ApiJson, ApiQuery, RawJson};
pub use pagination::PaginationParams;
pub use path::parse_id;
