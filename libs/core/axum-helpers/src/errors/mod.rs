pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1003,
///   "error": "NOT_FOUND",
///   "message": "Product 65f1c0ffee0000000000cafe not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Driver errors are logged in full but never echoed to the client
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SerdeJson(_) => ErrorCode::SerdeJsonError,
            Self::JsonExtractorRejection(
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_),
            ) => ErrorCode::InvalidJson,
            Self::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            Self::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::JsonExtractorRejection(e) => e.status(),
            Self::QueryExtractorRejection(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SerdeJson(_) | Self::Database(_) | Self::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else if status == StatusCode::NOT_FOUND {
            tracing::info!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(error_code = code.code(), error = %self, "Request rejected");
        }

        let message = match self {
            Self::JsonExtractorRejection(e) => e.body_text(),
            Self::QueryExtractorRejection(e) => e.body_text(),
            Self::NotFound(message) | Self::InternalServerError(message) => message,
            Self::SerdeJson(_) | Self::Database(_) => code.default_message().to_string(),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
