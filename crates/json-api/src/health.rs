//! Readiness Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{errors::ApiError, extensions::*, state::State};

/// Readiness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReadinessResponse {
    /// `OK` or `Error`
    pub status: String,

    /// `Connected` or `Disconnected`
    pub database: String,

    /// Why the database check failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness handler
///
/// Pings the database; answers 500 when it is unreachable.
#[endpoint(
    tags("health"),
    summary = "Readiness check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Database reachable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.health.check_database().await {
        Ok(()) => Ok(Json(ReadinessResponse {
            status: "OK".to_string(),
            database: "Connected".to_string(),
            error: None,
        })),
        Err(source) => {
            error!("database health check failed: {source}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            Ok(Json(ReadinessResponse {
                status: "Error".to_string(),
                database: "Disconnected".to_string(),
                error: Some(source.to_string()),
            }))
        }
    }
}
