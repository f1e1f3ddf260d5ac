//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::{OrderId, OrderStatus};

use crate::{errors::ApiError, extensions::*, state::State};

const ORDER_NOT_FOUND: &str = "Order not found";

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// One of `pending`, `processing`, `shipped`, `delivered`, `completed`,
    /// `cancelled`
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

fn invalid_status() -> ApiError {
    let statuses = OrderStatus::ALL
        .into_iter()
        .map(OrderStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    ApiError::bad_request(format!("Invalid status. Must be one of: {statuses}"))
}

/// Update Order Status Handler
///
/// Moves an order to any known status.
#[endpoint(tags("admin"), summary = "Update Order Status", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = req
        .parse_json::<UpdateStatusRequest>()
        .await
        .map_err(|_ignored| invalid_status())?;

    let status = request
        .status
        .as_deref()
        .unwrap_or_default()
        .parse::<OrderStatus>()
        .map_err(|_ignored| invalid_status())?;

    let id: OrderId = id.into_id(ORDER_NOT_FOUND)?;

    state.app.orders.update_status(id, status).await?;

    Ok(Json(MessageResponse {
        message: "Order status updated successfully".to_string(),
    }))
}
