//! Delete Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::ApiError, extensions::*, state::State};

/// Delete Customer Handler
///
/// Removes a customer's orders and registry entry.
#[endpoint(
    tags("admin"),
    summary = "Delete Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Customer deleted"),
    ),
)]
pub(crate) async fn handler(
    user_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .delete_customer(user_id.into_inner().trim())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
