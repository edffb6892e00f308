use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors abort startup; nothing runs with a partial config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingJwtSecret,

    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        name: &'static str,
        message: String,
    },
}

/// Application settings loaded once from the environment at startup.
///
/// The signing secret is validated here and injected into the services that
/// need it; nothing reads process-wide state at call time.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub super_admin_email: Option<String>,
    pub super_admin_password: Option<String>,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://marketplace.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                message: format!("not a valid port number: {}", raw),
            })?,
            Err(_) => 4000,
        };

        let cache_ttl_secs = match env::var("CACHE_TTL_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "CACHE_TTL_SECS",
                message: format!("not a valid number of seconds: {}", raw),
            })?,
            Err(_) => 60,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            super_admin_email: env::var("SUPER_ADMIN_EMAIL").ok(),
            super_admin_password: env::var("SUPER_ADMIN_PASSWORD").ok(),
        })
    }
}
