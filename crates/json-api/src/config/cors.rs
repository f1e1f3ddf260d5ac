//! CORS Config

use clap::Args;

/// Browser client settings.
#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Origin of the storefront web client
    #[arg(long, env = "CLIENT_ORIGIN", default_value = "http://localhost:5173")]
    pub client_origin: String,
}
