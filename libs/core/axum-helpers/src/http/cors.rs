use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Parses a comma-separated `CORS_ALLOWED_ORIGIN` value.
///
/// Blank entries are skipped; an empty list or an entry that is not a valid
/// header value is an error.
pub fn parse_allowed_origins(raw: &str) -> std::io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", origin, e),
                )
            })
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN contains no origins",
        ));
    }

    Ok(origins)
}

/// CORS for the products API: the given origins, the CRUD methods,
/// JSON/NDJSON content negotiation headers and a 1 hour preflight cache.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_origin() {
        let origins = parse_allowed_origins("http://localhost:3000").unwrap();
        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:3000")]);
    }

    #[test]
    fn test_parse_multiple_origins_trims_and_skips_blanks() {
        let origins =
            parse_allowed_origins(" http://localhost:3000 , ,https://shop.example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://shop.example.com");
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(parse_allowed_origins(" , ").is_err());
    }

    #[test]
    fn test_parse_invalid_header_value_is_error() {
        let err = parse_allowed_origins("http://bad\norigin").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
