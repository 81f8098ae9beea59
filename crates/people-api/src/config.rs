//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `sqlite://people.db` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `DB_ECHO_SQL` | `false` |
//! | `ALLOWED_ORIGINS` | `http://localhost:5000` |

use std::net::SocketAddr;

use people_core::{Error, Result};
use people_db::{PoolConfig, DEFAULT_DATABASE_URL};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5000";

/// Runtime settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub echo_sql: bool,
    /// Raw comma-separated CORS origin list.
    pub allowed_origins: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: people_db::pool::DEFAULT_MAX_CONNECTIONS,
            echo_sql: false,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT '{}': {}", v, e)))?,
            None => defaults.port,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(Error::Config(
                        "DB_MAX_CONNECTIONS must be at least 1".to_string(),
                    ))
                }
                Err(e) => return Err(Error::Config(format!("DB_MAX_CONNECTIONS '{}': {}", v, e))),
            },
            None => defaults.max_connections,
        };
        let echo_sql = match lookup("DB_ECHO_SQL") {
            Some(v) => parse_bool("DB_ECHO_SQL", &v)?,
            None => defaults.echo_sql,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            max_connections,
            echo_sql,
            allowed_origins: lookup("ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins),
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("HOST '{}': {}", self.host, e)))
    }

    /// Pool settings derived from this configuration.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::default()
            .max_connections(self.max_connections)
            .echo_sql(self.echo_sql)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!("{} '{}' is not a boolean", key, other))),
    }
}
