//! MongoDB connection management and health checks

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_with_retry, redacted_hosts};
pub use health::{HealthStatus, check_health_detailed};

pub use mongodb::{Client, Collection, Database};
