//! Readiness checks

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query_scalar};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("database unreachable")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PgHealthService {
    pool: PgPool,
}

impl PgHealthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check_database(&self) -> Result<(), HealthError> {
        let _: i32 = query_scalar("SELECT 1").fetch_one(&self.pool).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Round-trip a trivial query through the pool.
    async fn check_database(&self) -> Result<(), HealthError>;
}
