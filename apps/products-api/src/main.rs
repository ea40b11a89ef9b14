//! Products API - REST server over MongoDB

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::connect(config).await?;
    api::init_indexes(&state).await?;

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state)).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    let addr = state.config.bind_address();
    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        %addr,
        "Starting"
    );

    let client = state.client.clone();
    create_production_app(app, &addr, SHUTDOWN_TIMEOUT, async move {
        client.shutdown().await;
        info!("MongoDB pool closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {e}"))?;

    info!("Products API stopped");
    Ok(())
}
