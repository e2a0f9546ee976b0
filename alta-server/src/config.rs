//! Server configuration

use chrono_tz::Tz;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration error: a variable is set but unusable
#[derive(Debug, Error)]
#[error("invalid {name}={value}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Which [`DocumentStore`](crate::store::DocumentStore) backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `sqlite` or `memory`, got `{other}`")),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    pub storage_backend: StorageBackend,
    /// SQLite URL (only used by the sqlite backend)
    pub database_url: String,
    /// Business time zone: calendar days and months are cut here
    pub timezone: Tz,
    /// Environment: development | staging | production
    pub environment: String,
    pub request_timeout: Duration,
    /// Enables daily rolling log files when set
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            storage_backend: StorageBackend::Sqlite,
            database_url: "sqlite:alta.db".into(),
            timezone: chrono_tz::America::Asuncion,
            environment: "development".into(),
            request_timeout: Duration::from_millis(30_000),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            http_port: parse_var(&lookup, "HTTP_PORT")?.unwrap_or(defaults.http_port),
            storage_backend: parse_var(&lookup, "STORAGE_BACKEND")?
                .unwrap_or(defaults.storage_backend),
            database_url: lookup("DATABASE_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.database_url),
            timezone: parse_var(&lookup, "TIMEZONE")?.unwrap_or(defaults.timezone),
            environment: lookup("ENVIRONMENT")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.environment),
            request_timeout: parse_var::<u64>(&lookup, "REQUEST_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e: T::Err| ConfigError {
            name,
            reason: e.to_string(),
            value,
        }),
    }
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.storage_backend, StorageBackend::Sqlite);
        assert_eq!(config.database_url, "sqlite:alta.db");
        assert_eq!(config.timezone, chrono_tz::America::Asuncion);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HTTP_PORT", "8081"),
            ("STORAGE_BACKEND", "memory"),
            ("TIMEZONE", "America/Argentina/Buenos_Aires"),
            ("REQUEST_TIMEOUT_MS", "500"),
            ("LOG_DIR", "/tmp/alta-logs"),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.timezone, chrono_tz::America::Argentina::Buenos_Aires);
        assert_eq!(config.request_timeout, Duration::from_millis(500));
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/alta-logs"));
    }

    #[test]
    fn test_invalid_values_fail() {
        let err = Config::from_lookup(lookup(&[("HTTP_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.name, "HTTP_PORT");

        let err = Config::from_lookup(lookup(&[("STORAGE_BACKEND", "redis")])).unwrap_err();
        assert_eq!(err.name, "STORAGE_BACKEND");

        let err = Config::from_lookup(lookup(&[("TIMEZONE", "Mars/Olympus")])).unwrap_err();
        assert_eq!(err.name, "TIMEZONE");
    }
}
