//! Authentication

mod errors;
mod jwt;
mod models;
mod service;

pub use errors::*;
pub use jwt::{JwtConfig, JwtIdentityProvider};
pub use models::*;
pub use service::*;
