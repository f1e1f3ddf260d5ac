//! Listener config

use clap::Args;

/// Where the storefront API listens. The default port is the one the browser
/// client falls back to when no API base URL is configured.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind
    #[arg(short = 'H', long = "host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to bind
    #[arg(short, long = "port", env = "SERVER_PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port`, ready for the TCP listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
