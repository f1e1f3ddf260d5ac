//! Numeric path id parsing helpers.

use salvo::oapi::extract::PathParam;

use storefront_app::ids::TypedId;

use crate::errors::ApiError;

/// Ids that cannot name a row are reported as a missing resource.
pub(crate) trait PathIdExt {
    fn into_id<T>(self, not_found: &str) -> Result<TypedId<T>, ApiError>;
}

impl PathIdExt for PathParam<String> {
    fn into_id<T>(self, not_found: &str) -> Result<TypedId<T>, ApiError> {
        self.into_inner()
            .trim()
            .parse::<i64>()
            .ok()
            .map(TypedId::from_i64)
            .filter(|id| id.is_valid())
            .ok_or_else(|| ApiError::not_found(not_found))
    }
}
