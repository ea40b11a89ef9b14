//! Error codes carried in every error response body.
//!
//! Each code has a client-facing string, an integer for logs and a default
//! message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.code(), 1003);
//! assert_eq!(code.default_message(), "Resource not found");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Request body is not valid JSON for the target type
    InvalidJson,

    /// Query string could not be deserialized
    InvalidQuery,

    NotFound,

    /// JSON extraction failed for a reason other than syntax (e.g. content type)
    JsonExtraction,

    // Server errors (1100s)
    InternalError,

    // Database errors (2000s)
    /// Driver or server error while executing a database operation
    DatabaseError,

    // Serialization errors (5000s)
    SerdeJsonError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1099: client errors
    /// - 1100-1199: server errors
    /// - 2000-2999: database errors
    /// - 5000-5999: serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidJson => 1001,
            Self::InvalidQuery => 1002,
            Self::NotFound => 1003,
            Self::JsonExtraction => 1004,
            Self::InternalError => 1100,
            Self::DatabaseError => 2001,
            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Request body is not valid JSON",
            Self::InvalidQuery => "Query parameters are invalid",
            Self::NotFound => "Resource not found",
            Self::JsonExtraction => "Failed to extract JSON from request body",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "A database error occurred",
            Self::SerdeJsonError => "Failed to process JSON data",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::SerdeJsonError).unwrap();
        assert_eq!(json, "\"SERDE_JSON_ERROR\"");
        assert_eq!(ErrorCode::SerdeJsonError.as_str(), "SERDE_JSON_ERROR");
    }

    #[test]
    fn test_codes_are_grouped_by_range() {
        assert!((1000..1100).contains(&ErrorCode::InvalidQuery.code()));
        assert!((1100..1200).contains(&ErrorCode::InternalError.code()));
        assert!((2000..3000).contains(&ErrorCode::DatabaseError.code()));
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
    }
}
