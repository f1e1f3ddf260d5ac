//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{IdentityProvider, JwtConfig, JwtIdentityProvider},
    database::{self, Db, PoolSettings},
    domain::{
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        stats::{PgStatsService, StatsService},
        users::{PgUsersService, UsersService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Everything needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub pool: PoolSettings,
    pub statement_timeout: Duration,
    pub run_migrations: bool,
    pub jwt: JwtConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub stats: Arc<dyn StatsService>,
    pub health: Arc<dyn HealthService>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppContext {
    /// Connect to the database and wire up every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&settings.database_url, settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool.clone()).with_statement_timeout(settings.statement_timeout);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db)),
            health: Arc::new(PgHealthService::new(pool)),
            identity: Arc::new(JwtIdentityProvider::new(&settings.jwt)),
        })
    }
}
