// src/config.rs
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    session_secret: String,
    session_ttl_secs: i64,
    admin_password: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://kiji.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_session_ttl() -> i64 {
    3600
}

fn default_admin_password() -> String {
    "admin".into()
}

const MIN_SECRET_LENGTH: usize = 32;

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;

        if session_secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "SESSION_SECRET must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        let session_ttl_secs = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or_else(default_session_ttl);

        if session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid(
                "SESSION_TTL_SECONDS must be positive".into(),
            ));
        }

        let admin_password =
            env::var("ADMIN_BOOTSTRAP_PASSWORD").unwrap_or_else(|_| default_admin_password());

        Ok(Self {
            database_url,
            listen_addr,
            session_secret,
            session_ttl_secs,
            admin_password,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn session_secret(&self) -> &str {
        &self.session_secret
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Fixed default password for the one-time "admin" bootstrap.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }
}
