//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("bearer token rejected")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,
}

impl From<jsonwebtoken::errors::Error> for AuthServiceError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(error)
    }
}
