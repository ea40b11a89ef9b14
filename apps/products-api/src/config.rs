//! Configuration for Products API

use core_config::{app_info, env_or_default, env_parse_or, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Everything the binary reads from the environment at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    /// `HOST`, all interfaces unless set
    pub host: String,
    /// `PORT`, 8080 unless set
    pub port: u16,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = app_info!();

        let mut mongodb = MongoConfig::from_env()?;
        mongodb
            .app_name
            .get_or_insert_with(|| app.name.to_string());

        Ok(Self {
            app,
            mongodb,
            host: env_or_default("HOST", "0.0.0.0"),
            port: env_parse_or("PORT", 8080)?,
            environment: Environment::from_env(),
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("MONGODB_APP_NAME", None),
                ("APP_ENV", None),
                ("HOST", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database, "shop");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("products_api"));
                assert_eq!(config.bind_address(), "0.0.0.0:8080");
                assert!(config.environment.is_development());
                assert_eq!(config.app.name, "products_api");
            },
        );
    }

    #[test]
    fn test_config_from_env_production() {
        temp_env::with_vars(
            [
                ("MONGO_URL", Some("mongodb://mongo:27017")),
                ("MONGO_DATABASE", Some("shop")),
                ("MONGODB_URL", None),
                ("MONGODB_DATABASE", None),
                ("APP_ENV", Some("production")),
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("3003")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.bind_address(), "127.0.0.1:3003");
                assert_eq!(config.mongodb.url, "mongodb://mongo:27017");
            },
        );
    }

    #[test]
    fn test_config_requires_database() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(_)));
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("PORT", Some("eighty")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { .. }));
            },
        );
    }
}
