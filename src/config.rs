use std::env;

use actix_web::cookie::Key;

use crate::types::StringError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
/// `Key::derive_from` needs at least 256 bits of master key.
pub const MIN_SECRET_LEN: usize = 32;

pub enum DatabaseConfig {
    Remote { url: String, auth_key: String },
    Local { path: String },
}

/// Built once at startup and shared read-only through `AppState`.
pub struct Config {
    pub secret_key: Key,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| StringError(format!("{name} must be set")))
        };

        let secret = required("SECRET_KEY")?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(StringError(format!(
                "SECRET_KEY must be at least {MIN_SECRET_LEN} bytes, is {}",
                secret.len()
            ))
            .into());
        }

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| StringError(format!("PORT {port} is not a valid port: {e}")))?,
            None => DEFAULT_PORT,
        };

        let use_local = lookup("USE_LOCAL").unwrap_or("false".into());
        let database = if use_local == "false" {
            DatabaseConfig::Remote {
                url: required("DATABASE_URL")?,
                auth_key: required("DATABASE_AUTH_KEY")?,
            }
        } else {
            DatabaseConfig::Local {
                path: required("LOCAL_DB_URL")?,
            }
        };

        Ok(Config {
            secret_key: Key::derive_from(secret.as_bytes()),
            host,
            port,
            database,
        })
    }
}
