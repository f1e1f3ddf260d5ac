//! JWT bearer verification

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::auth::{AuthServiceError, IdentityProvider, Principal, Role};

/// Settings for verifying HS256 tokens minted by the identity provider.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RoleMetadata {
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,

    #[serde(default)]
    email: Option<String>,

    #[serde(default, alias = "given_name", alias = "firstName")]
    first_name: Option<String>,

    #[serde(default, alias = "family_name", alias = "lastName")]
    last_name: Option<String>,

    #[serde(default)]
    role: Option<String>,

    #[serde(default)]
    metadata: Option<RoleMetadata>,

    #[serde(default, alias = "publicMetadata")]
    public_metadata: Option<RoleMetadata>,

    #[serde(default, alias = "privateMetadata")]
    private_metadata: Option<RoleMetadata>,
}

impl Claims {
    fn role_claim(&self) -> Option<&str> {
        self.role.as_deref().or_else(|| {
            [
                &self.metadata,
                &self.public_metadata,
                &self.private_metadata,
            ]
            .into_iter()
            .flatten()
            .find_map(|metadata| metadata.role.as_deref())
        })
    }

    fn into_principal(self) -> Result<Principal, AuthServiceError> {
        let user_id = self.sub.trim();

        if user_id.is_empty() {
            return Err(AuthServiceError::MissingSubject);
        }

        let role = Role::from_claim(self.role_claim());

        Ok(Principal {
            user_id: user_id.to_string(),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
        })
    }
}

/// Verifies signed bearer tokens and normalizes their claims.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("JwtIdentityProvider")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtIdentityProvider {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` and map its claims onto a [`Principal`].
    ///
    /// # Errors
    ///
    /// Returns an error if the signature, expiry, issuer or audience checks
    /// fail, or the token has no subject.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthServiceError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;

        data.claims.into_principal()
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<Principal, AuthServiceError> {
        self.verify(bearer_token)
    }
}
