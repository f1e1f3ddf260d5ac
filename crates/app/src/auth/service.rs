//! Identity provider seam.

use async_trait::async_trait;
use mockall::automock;

use crate::auth::{AuthServiceError, Principal};

/// Resolves a bearer credential into an authenticated principal.
///
/// Implementations own every detail of the credential format; callers only
/// ever see the typed [`Principal`].
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;
}
