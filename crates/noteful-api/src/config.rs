//! Server configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `postgres://localhost/noteful-app` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `DB_MAX_CONNECTIONS` | `2` |
//! | `DB_MIN_CONNECTIONS` | `1` |
//! | `CORS_ORIGINS` | unset (any origin) |

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use noteful_core::{Error, Result};
use noteful_db::PoolConfig;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/noteful-app";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool: PoolConfig,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<HeaderValue>>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        let mut pool = PoolConfig::default();
        if let Some(n) = parse_var(&lookup, "DB_MAX_CONNECTIONS")? {
            pool = pool.max_connections(n);
        }
        if let Some(n) = parse_var(&lookup, "DB_MIN_CONNECTIONS")? {
            pool = pool.min_connections(n);
        }
        if pool.min_connections > pool.max_connections {
            return Err(Error::Config(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                pool.min_connections, pool.max_connections
            )));
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_origins(&s));

        Ok(Self {
            database_url,
            host,
            port,
            pool,
            cors_origins,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid HOST/PORT: {}", e)))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| {
                Error::Config(format!("{} must be a number, got '{}': {}", key, raw, e))
            }),
    }
}

fn parse_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.pool.max_connections, 2);
        assert_eq!(config.pool.min_connections, 1);
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://dev:dev@db/noteful"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DB_MAX_CONNECTIONS", "10"),
            ("DB_MIN_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://dev:dev@db/noteful");
        assert_eq!(config.port, 9000);
        assert_eq!(config.pool.max_connections, 10);
        assert_eq!(config.pool.min_connections, 2);
        assert_eq!(
            config.bind_addr().unwrap(),
            "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("DB_MAX_CONNECTIONS", "1"),
            ("DB_MIN_CONNECTIONS", "3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cors_origins_parsed_and_blank_entries_skipped() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, ,https://noteful.example",
        )]))
        .unwrap();

        let origins = config.cors_origins.unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
    }

    #[test]
    fn test_blank_cors_origins_means_any() {
        let config = ServerConfig::from_lookup(lookup(&[("CORS_ORIGINS", "  ")])).unwrap();
        assert!(config.cors_origins.is_none());
    }
}
