//! Extractors that turn axum rejections into [`AppError`](crate::errors::AppError)
//! so malformed requests get the same error body as every other failure.

pub mod json_body;
pub mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
