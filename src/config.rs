//! Configuration management for the task API.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8080`.
//! - `DATABASE_URL` - Optional. Document store location. Defaults to `taskdb.sqlite`.
//! - `TASK_STORE` - Optional. `sqlite` (default) or `memory`.
//! - `WRITE_TIMEOUT_SECS` - Optional. Deadline for create/update/delete. Defaults to `5`.
//! - `READ_TIMEOUT_SECS` - Optional. Deadline for listing tasks. Defaults to `10`.

use std::time::Duration;
use thiserror::Error;

use crate::repository::{TaskStoreType, Timeouts};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Document store connection string
    pub database_url: String,

    /// Which repository backend to use
    pub store_type: TaskStoreType,

    /// Per-operation store deadlines
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "taskdb.sqlite".to_string(),
            store_type: TaskStoreType::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (useful for testing).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?,
            None => defaults.port,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let store_type = lookup("TASK_STORE")
            .map(|s| TaskStoreType::from_str(&s))
            .unwrap_or(defaults.store_type);

        let timeouts = Timeouts {
            write: parse_secs(&lookup, "WRITE_TIMEOUT_SECS", defaults.timeouts.write)?,
            read: parse_secs(&lookup, "READ_TIMEOUT_SECS", defaults.timeouts.read)?,
        };

        Ok(Self {
            host,
            port,
            database_url,
            store_type,
            timeouts,
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    let secs: u64 = value
        .parse()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("{}", e)))?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "taskdb.sqlite");
        assert_eq!(config.store_type, TaskStoreType::Document);
        assert_eq!(config.timeouts, Timeouts::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_URL", "sqlite:///var/lib/tasks.db"),
            ("TASK_STORE", "memory"),
            ("WRITE_TIMEOUT_SECS", "2"),
            ("READ_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.database_url, "sqlite:///var/lib/tasks.db");
        assert_eq!(config.store_type, TaskStoreType::Memory);
        assert_eq!(config.timeouts.write, Duration::from_secs(2));
        assert_eq!(config.timeouts.read, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("READ_TIMEOUT_SECS", "0")])).is_err());
    }
}
