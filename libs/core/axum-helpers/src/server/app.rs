use super::shutdown::{ShutdownCoordinator, wait_for_shutdown};
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, parse_allowed_origins, security_headers};
use axum::{Router, http::HeaderValue, middleware};
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};
use utoipa::OpenApi;

const ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGIN";
const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// [`build_router`] with origins taken from `CORS_ALLOWED_ORIGIN`.
///
/// The variable holds a comma-separated list such as
/// `http://localhost:3000,https://shop.example.com`; unset, empty or
/// malformed values are a startup error.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let raw = std::env::var(ORIGINS_VAR).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{ORIGINS_VAR} must be set, e.g. {ORIGINS_VAR}=http://localhost:3000"),
        )
    })?;
    let origins = parse_allowed_origins(&raw)?;
    info!(origins = %raw, "CORS origins loaded");

    Ok(build_router::<T>(apis, origins))
}

/// Documentation UIs for `T`, all reading the same OpenAPI document.
fn docs_router<T>() -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as _};
    use utoipa_scalar::{Scalar, Servable as _};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
}

/// `apis` under `/api` next to the docs UIs, behind the shared middleware
/// stack (tracing, security headers, CORS, compression) with a JSON 404
/// for anything unmatched.
///
/// `apis` must already carry its state.
pub fn build_router<T>(apis: Router, allowed_origins: Vec<HeaderValue>) -> Router
where
    T: OpenApi + 'static,
{
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    docs_router::<T>()
        .nest("/api", apis)
        .fallback(not_found)
        .layer(trace)
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(allowed_origins))
        .layer(CompressionLayer::new())
}

/// Listens on `bind_addr` (`host:port`) and serves `router` until a stop
/// signal arrives, then runs `cleanup` for at most `shutdown_timeout`.
///
/// ```ignore
/// let cleanup = async move { mongo_client.shutdown().await };
/// create_production_app(router, &config.bind_address(), Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    bind_addr: &str,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    let coordinator = ShutdownCoordinator::new();
    let signals = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for_signal().await }
    });
    let cleanup_task = tokio::spawn({
        let stopped = wait_for_shutdown(coordinator.subscribe());
        async move {
            stopped.await;
            if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
                warn!(timeout = ?shutdown_timeout, "Cleanup timed out");
            } else {
                info!("Cleanup finished");
            }
        }
    });

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(coordinator.subscribe()))
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server stopped with an error");
    }

    // Cleanup also runs when serving fails without a signal.
    coordinator.shutdown();
    signals.abort();
    let _ = cleanup_task.await;

    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test-api"))]
    struct TestDoc;

    fn app() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        build_router::<TestDoc>(apis, vec![HeaderValue::from_static("http://localhost:3000")])
    }

    async fn get_path(path: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_nested_under_api() {
        let response = get_path("/api/ping").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = get_path("/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = get_path("/api-docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc["info"]["title"], "test-api");
    }
}
