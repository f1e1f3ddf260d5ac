//! Server configuration module

use std::time::Duration;

use clap::Parser;

use storefront_app::{auth::JwtConfig, context::AppSettings, database::PoolSettings};

use crate::config::{
    auth::AuthConfig,
    cors::CorsConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ListenConfig,
};

pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token verification settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Browser client settings.
    #[command(flatten)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring up the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            pool: PoolSettings {
                max_connections: self.database.max_connections,
                acquire_timeout: Duration::from_secs(self.database.acquire_timeout_seconds),
            },
            statement_timeout: Duration::from_millis(self.database.statement_timeout_ms),
            run_migrations: self.database.run_migrations,
            jwt: JwtConfig {
                secret: self.auth.jwt_secret.clone(),
                issuer: self.auth.jwt_issuer.clone(),
                audience: self.auth.jwt_audience.clone(),
            },
        }
    }
}
