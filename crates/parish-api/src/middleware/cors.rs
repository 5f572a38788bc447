//! CORS layer for the public booking form and the staff dashboard.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use parish_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration. Entries that do not parse
/// are logged and skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = if is_wildcard(&config.allowed_origins) {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(parse_all::<HeaderValue>(&config.allowed_origins, "origin"))
    };

    let layer = layer.allow_methods(parse_all::<Method>(&config.allowed_methods, "method"));

    let layer = if is_wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_all::<HeaderName>(&config.allowed_headers, "header"))
    };

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}

fn is_wildcard(entries: &[String]) -> bool {
    entries.iter().any(|e| e == "*")
}

fn parse_all<T: FromStr>(entries: &[String], what: &str) -> Vec<T> {
    entries
        .iter()
        .filter_map(|raw| match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(entry = %raw, kind = what, "Ignoring invalid CORS entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_entries_are_skipped() {
        let origins = vec![
            "https://parroquia.example".to_string(),
            "not a header\nvalue".to_string(),
        ];
        assert_eq!(parse_all::<HeaderValue>(&origins, "origin").len(), 1);

        let methods = vec!["GET".to_string(), "PUT".to_string(), "BAD METHOD".to_string()];
        assert_eq!(parse_all::<Method>(&methods, "method").len(), 2);
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(is_wildcard(&["*".to_string()]));
        assert!(!is_wildcard(&["https://parroquia.example".to_string()]));
    }
}
