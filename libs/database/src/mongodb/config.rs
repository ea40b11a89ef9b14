use mongodb::options::ClientOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or};

/// Where the products database lives and how the driver pool is sized.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// `mongodb://` or `mongodb+srv://` URI; may carry credentials, so it
    /// is never logged
    pub url: String,
    pub database: String,
    /// Sent in the connection handshake; shows up in server logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout: Duration::from_secs(10),
            server_selection_timeout: Duration::from_secs(30),
        }
    }

    /// Copy pool size, timeouts and app name onto parsed driver options.
    pub fn apply(&self, options: &mut ClientOptions) {
        options.max_pool_size = Some(self.max_pool_size);
        options.min_pool_size = Some(self.min_pool_size);
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.server_selection_timeout);
        if self.app_name.is_some() {
            options.app_name.clone_from(&self.app_name);
        }
    }
}

/// `MONGODB_URL` / `MONGO_URL` and `MONGODB_DATABASE` / `MONGO_DATABASE`
/// are required. Optional: `MONGODB_APP_NAME`, `MONGODB_MAX_POOL_SIZE`,
/// `MONGODB_MIN_POOL_SIZE`, `MONGODB_CONNECT_TIMEOUT_SECS` and
/// `MONGODB_SERVER_SELECTION_TIMEOUT_SECS`.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(
            env_first_of(&["MONGODB_URL", "MONGO_URL"])?,
            env_first_of(&["MONGODB_DATABASE", "MONGO_DATABASE"])?,
        );

        let secs = |key: &str, fallback: Duration| {
            env_parse_or(key, fallback.as_secs()).map(Duration::from_secs)
        };

        Ok(Self {
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout: secs("MONGODB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
            server_selection_timeout: secs(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout,
            )?,
            ..defaults
        })
    }
}
