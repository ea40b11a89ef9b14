//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the JSON error body every endpoint returns
//! - **[`extractors`]**: JSON and query extractors that reject with [`AppError`]
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::create_router;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new()).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthCheckResult, HealthResponse, ShutdownCoordinator, build_router,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, parse_allowed_origins, security_headers};

pub use errors::{
    AppError, ErrorCode, ErrorResponse,
    handlers::not_found,
    responses::{
        BadRequestJsonResponse, BadRequestQueryResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};

pub use extractors::{JsonBody, QueryParams};
