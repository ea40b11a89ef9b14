//! Shared handles built once at startup

use database::common::Backoff;
use database::mongodb::{connect_with_retry, Client, Database};
use tracing::info;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Kept for `/ready` pings and for closing the pool on shutdown
    pub client: Client,
    /// Handle to `config.mongodb.database`
    pub db: Database,
}

impl AppState {
    /// Connect to MongoDB, retrying while the server comes up.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let client = connect_with_retry(&config.mongodb, &Backoff::default()).await?;
        let db = client.database(&config.mongodb.database);
        info!(database = %config.mongodb.database, "Using MongoDB database");

        Ok(Self { config, client, db })
    }
}
