//! Typed path parameter helpers.

use std::str::FromStr;

use parish_core::error::AppError;

/// Parses an identifier from a path segment.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {what} id: {raw}")))
}
