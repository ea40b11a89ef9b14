//! Product catalogue over a `products` MongoDB collection.
//!
//! Requests flow `handlers` -> [`ProductController`] -> [`ProductService`]
//! -> [`ProductRepository`]. Lists are returned as lazy streams that only
//! touch the database once polled; single-item lookups that find nothing
//! resolve to `None`, which the HTTP layer turns into a 404.
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, DefaultProductService, MongoProductRepository, ProductController,
//! };
//!
//! # async fn wire(db: mongodb::Database) -> domain_products::ProductResult<axum::Router> {
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let controller = ProductController::new(DefaultProductService::new(repository));
//! Ok(handlers::router(controller))
//! # }
//! ```

pub mod controller;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use controller::ProductController;
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{PriceRange, Product, ProductDto};
pub use crate::mongodb::MongoProductRepository;
pub use repository::{ProductRepository, ProductStream};
pub use service::{DefaultProductService, ProductDtoStream, ProductService};
