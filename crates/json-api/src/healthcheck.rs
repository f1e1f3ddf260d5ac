//! Liveness

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Process liveness, independent of the database
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    /// Always `ok` while the process can answer
    pub status: String,

    /// Build version of the running API
    pub version: String,
}

/// Liveness probe for orchestrators. Readiness, including the database, is
/// `/api/health`.
#[endpoint(tags("health"), summary = "Liveness probe")]
pub(crate) async fn handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
