//! Wiring of the products domain onto the shared database

use axum::Router;
use domain_products::{handlers, DefaultProductService, MongoProductRepository, ProductController};

use crate::state::AppState;

pub fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::new(&state.db)
}

/// `/products` routes, with the controller as their state
pub fn router(state: &AppState) -> Router {
    let service = DefaultProductService::new(repository(state));
    handlers::router(ProductController::new(service))
}
