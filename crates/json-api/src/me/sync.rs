//! Sync Current User Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{errors::ApiError, extensions::*, state::State};

/// Sync Current User Handler
///
/// Records the caller in the user registry. Failures are logged and never
/// block the client.
#[endpoint(
    tags("users"),
    summary = "Sync Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Sync attempted"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    if let Err(source) = state.app.users.sync_user(principal).await {
        warn!(user_id = %principal.user_id, "failed to sync user: {source}");
    }

    Ok(StatusCode::NO_CONTENT)
}
