//! PostgreSQL storage for PSO projects, resources and resource requests.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod concurrency;
pub mod config;
pub mod database;
pub mod error;
pub mod lookup;
pub mod models;
pub mod query;
pub mod repositories;

pub use config::DbConfig;
pub use database::{Database, Deadline};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool sized and timed by `config`.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .idle_timeout(Duration::from_secs(config.max_idle_secs))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
