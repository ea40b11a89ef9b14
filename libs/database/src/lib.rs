//! Database library providing MongoDB connectivity and shared utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::{common::Backoff, mongodb};
//!
//! let config = mongodb::MongoConfig::new("mongodb://localhost:27017", "shop");
//! let client = mongodb::connect_with_retry(&config, &Backoff::default()).await?;
//! let db = client.database(&config.database);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
