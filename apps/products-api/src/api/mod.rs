//! HTTP surface mounted by `main`

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Everything nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Create the indexes each collection's queries rely on.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::repository(state).init_indexes().await?;
    Ok(())
}
