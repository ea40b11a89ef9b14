//! Readiness endpoint

use axum::{extract::State, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture, HealthCheckResult};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> HealthCheckResult {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = check_health_detailed(&state.client).await;
        tracing::debug!(latency = ?status.latency, healthy = status.healthy, "MongoDB ping");
        match status.message {
            None if status.healthy => Ok(()),
            message => Err(message.unwrap_or_else(|| "ping failed".to_string())),
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

/// `/ready`: 200 while MongoDB answers pings, 503 otherwise
pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
