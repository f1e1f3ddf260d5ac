//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use storefront_app::auth::Principal;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<&Principal, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, ApiError> {
        self.obtain::<Principal>()
            .map_err(|_ignored| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::auth::Role;

    use super::*;

    #[test]
    fn missing_principal_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.principal_or_401().err();

        assert_eq!(error.map(|error| error.status), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn inserted_principal_can_be_read_back() {
        let mut depot = Depot::new();

        depot.insert_principal(Principal {
            user_id: "user_1".to_string(),
            email: Some("ada@example.com".to_string()),
            first_name: None,
            last_name: None,
            role: Role::Customer,
        });

        assert_eq!(
            depot.principal_or_401().ok().map(|principal| principal.user_id.as_str()),
            Some("user_1")
        );
    }
}
