//! Application configuration loaded from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the SQLite database.
    pub database_url: SecretString,
    /// Address to bind the HTTP listener to.
    pub host: IpAddr,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Per-request timeout enforced by the middleware stack.
    pub request_timeout: Duration,
    /// Sentry DSN, if error reporting is enabled.
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first if
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `DATABASE_URL` (or its
    /// `LOCAL_DATABASE_URL` fallback) is missing, or if a numeric
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present; ignore if missing (production uses real env vars)
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: get_database_url()?,
            host: parse_var("HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_var("PORT", 3000)?,
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?),
            sentry_dsn: env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty()),
        })
    }

    /// The socket address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Reads `DATABASE_URL`, falling back to `LOCAL_DATABASE_URL` for
/// development setups.
fn get_database_url() -> Result<SecretString, ConfigError> {
    env::var("DATABASE_URL")
        .or_else(|_| env::var("LOCAL_DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_raw(var, env::var(var).ok(), default)
}

fn parse_raw<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|err: T::Err| ConfigError::InvalidVar {
            var,
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_default() {
        let port: u16 = parse_raw("PORT", None, 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_raw_valid() {
        let port: u16 = parse_raw("PORT", Some("8080".to_string()), 3000).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_raw_invalid() {
        let result: Result<u16, _> = parse_raw("PORT", Some("not-a-port".to_string()), 3000);
        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            sentry_dsn: None,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
