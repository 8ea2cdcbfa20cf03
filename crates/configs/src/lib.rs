//! # configs
//!
//! Environment configuration for rusty-blog. A `.env` file is honored when
//! present; process environment wins. Secrets are held in `secrecy` types so
//! they never end up in debug output or logs.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Listen port (`PORT`, default 5000).
    pub port: u16,
    /// Database connection string (`DATABASE_URL`).
    #[cfg(feature = "db-postgres")]
    pub database_url: SecretString,
    /// Token-signing secret (`JWT_SECRET`).
    pub jwt_secret: SecretString,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is fine; containers set the environment directly.
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .set_default("port", 5000)?
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize::<AppConfig>()?;

        debug!(port = cfg.port, "configuration loaded");
        Ok(cfg)
    }
}
