//! Admin Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::OrderSummary;

use crate::{errors::ApiError, extensions::*, money::to_json_number, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryResponse {
    pub id: i64,
    pub user_id: String,
    pub user_email: String,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: String,
    pub address: String,
    pub created_at: String,

    /// Number of line items in the order
    pub item_count: i64,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(OrderSummary { order, item_count }: OrderSummary) -> Self {
        OrderSummaryResponse {
            id: order.id.into_i64(),
            user_id: order.user_id,
            user_email: order.user_email,
            total_amount: to_json_number(order.total_amount),
            status: order.status.to_string(),
            payment_method: order.payment_method,
            address: order.address,
            created_at: order.created_at.to_string(),
            item_count,
        }
    }
}

/// Admin Order Index Handler
///
/// Returns every order, newest first.
#[endpoint(tags("admin"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<OrderSummaryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state.app.orders.list_orders().await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
