use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from pool construction and upkeep
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Build the process-wide connection pool from DATABASE_URL. Acquired once
/// at startup and passed down through application state; closed on shutdown.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let url = std::env::var("DATABASE_URL").map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
    connect_to(&url, config).await
}

pub async fn connect_to(url: &str, config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = pool_options(config).connect(url).await?;
    info!("created database pool ({} max connections)", config.max_connections);
    Ok(pool)
}

/// Pool that defers connecting until first use. Handlers that never reach
/// the database work against it without a server being up.
pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    Ok(pool_options(config).connect_lazy(url)?)
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
}

/// Apply embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
