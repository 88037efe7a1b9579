use std::str::FromStr;
use std::time::Duration;

use pso_core::error::CoreError;

/// Database configuration loaded from environment variables.
///
/// Only `DATABASE_URL` is required; everything else has a default suitable
/// for a single service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    /// Upper bound on open connections (default: `25`).
    pub max_connections: u32,
    /// Connections kept open while idle (default: `0`).
    pub min_connections: u32,
    /// Seconds before an idle connection is closed (default: `900`).
    pub max_idle_secs: u64,
    /// Deadline applied to every repository call (default: `5`).
    pub query_timeout_secs: u64,
    /// Seconds to wait for a pooled connection (default: `5`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 25;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 0;
    pub const DEFAULT_MAX_IDLE_SECS: u64 = 900;
    pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_connections: Self::DEFAULT_MIN_CONNECTIONS,
            max_idle_secs: Self::DEFAULT_MAX_IDLE_SECS,
            query_timeout_secs: Self::DEFAULT_QUERY_TIMEOUT_SECS,
            acquire_timeout_secs: Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    /// Load a `.env` file if one exists, then read the environment.
    pub fn load() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_MAX_CONNECTIONS`      | `25`     |
    /// | `DB_MIN_CONNECTIONS`      | `0`      |
    /// | `DB_MAX_IDLE_SECS`        | `900`    |
    /// | `DB_QUERY_TIMEOUT_SECS`   | `5`      |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`      |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CoreError::Internal("DATABASE_URL must be set".into()))?;

        let config = Self {
            database_url,
            max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                Self::DEFAULT_MAX_CONNECTIONS,
            )?,
            min_connections: parse_or(
                &lookup,
                "DB_MIN_CONNECTIONS",
                Self::DEFAULT_MIN_CONNECTIONS,
            )?,
            max_idle_secs: parse_or(&lookup, "DB_MAX_IDLE_SECS", Self::DEFAULT_MAX_IDLE_SECS)?,
            query_timeout_secs: parse_or(
                &lookup,
                "DB_QUERY_TIMEOUT_SECS",
                Self::DEFAULT_QUERY_TIMEOUT_SECS,
            )?,
            acquire_timeout_secs: parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
        };

        if config.max_connections == 0 {
            return Err(CoreError::Internal(
                "DB_MAX_CONNECTIONS must be greater than zero".into(),
            ));
        }
        if config.min_connections > config.max_connections {
            return Err(CoreError::Internal(
                "DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".into(),
            ));
        }
        if config.query_timeout_secs == 0 {
            return Err(CoreError::Internal(
                "DB_QUERY_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(config)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Internal(format!("{key} must be a non-negative integer"))),
    }
}
