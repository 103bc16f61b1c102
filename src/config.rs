//! Configuration module for environment variables and application settings

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

use crate::database::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Token signing configuration
    pub auth: AuthConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET environment variable is required"))?;
        let database_url = var("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = parse_or(var("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", 16usize)?;
        let tls = parse_or(var("DATABASE_TLS"), "DATABASE_TLS", false)?;

        Ok(Self {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(var("PORT"), "PORT", 3000u16)?,
                cors_origins: var("CORS_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours: parse_or(var("JWT_EXPIRY_HOURS"), "JWT_EXPIRY_HOURS", 24i64)?,
            },
            database: DatabaseConfig::from_url(&database_url, max_connections, tls)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw.trim().parse().with_context(|| format!("Invalid value for {key}: {raw}")),
        None => Ok(default),
    }
}
