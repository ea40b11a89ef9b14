use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Failures of product operations.
///
/// Only `NotFound` reaches clients verbatim; the other variants are logged
/// and answered with a generic 500 body.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Carries the requested id
    #[error("product {0} does not exist")]
    NotFound(String),

    #[error("mongodb: {0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => Self::NotFound(format!("Product {id} not found")),
            ProductError::Database(detail) => Self::Database(detail),
            ProductError::Internal(detail) => Self::InternalServerError(detail),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
