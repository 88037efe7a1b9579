//! The storage handle every repository call receives.

use std::future::Future;
use std::time::Duration;

use pso_core::error::CoreError;
use tokio::time::Instant;

use crate::config::DbConfig;
use crate::error::classify;
use crate::{create_pool, health_check, DbPool};

/// Connection pool plus the per-call deadline applied to every repository
/// operation.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
    query_timeout: Duration,
}

impl Database {
    pub const DEFAULT_QUERY_TIMEOUT: Duration =
        Duration::from_secs(DbConfig::DEFAULT_QUERY_TIMEOUT_SECS);

    /// Open the pool described by `config` and verify the server answers.
    pub async fn connect(config: &DbConfig) -> Result<Self, CoreError> {
        let pool = create_pool(config)
            .await
            .map_err(|e| classify("Database", e))?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );

        health_check(&pool)
            .await
            .map_err(|e| classify("Database", e))?;
        tracing::info!("Database health check passed");

        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    /// Wrap an existing pool with the default deadline.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Start the clock for one repository call on `entity`.
    pub fn deadline(&self, entity: &'static str) -> Deadline<'_> {
        let started = Instant::now();
        Deadline {
            pool: &self.pool,
            entity,
            started,
            expires_at: started + self.query_timeout,
        }
    }
}

/// A fixed point in time by which every store round-trip of one repository
/// call must finish.
///
/// Round-trips issued through the same deadline share its budget, so an
/// update followed by a version probe cannot take longer than one timeout.
#[derive(Debug)]
pub struct Deadline<'a> {
    pool: &'a DbPool,
    entity: &'static str,
    started: Instant,
    expires_at: Instant,
}

impl<'a> Deadline<'a> {
    pub fn pool(&self) -> &'a DbPool {
        self.pool
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Await a store operation, failing with [`CoreError::Internal`] if the
    /// deadline passes first. Storage errors are classified on the way out.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout_at(self.expires_at, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(self.entity, err)),
            Err(_) => {
                let elapsed_ms = self.elapsed().as_millis() as u64;
                tracing::warn!(entity = self.entity, elapsed_ms, "Database call timed out");
                Err(CoreError::Internal(format!(
                    "{} query timed out after {elapsed_ms}ms",
                    self.entity
                )))
            }
        }
    }
}
