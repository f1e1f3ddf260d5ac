//! Auth Config

use clap::Args;

/// Bearer token verification settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared HS256 secret used to verify bearer tokens
    #[arg(long, env = "AUTH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Expected `iss` claim, when set
    #[arg(long, env = "AUTH_JWT_ISSUER")]
    pub jwt_issuer: Option<String>,

    /// Expected `aud` claim, when set
    #[arg(long, env = "AUTH_JWT_AUDIENCE")]
    pub jwt_audience: Option<String>,
}
