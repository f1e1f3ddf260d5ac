//! My Orders Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::{OrderItemRecord, OrderWithItems};

use crate::{errors::ApiError, extensions::*, money::to_json_number, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: i64,
    pub quantity: i32,

    /// Unit price paid
    pub price: f64,

    /// Current catalog name, absent once the product is removed
    pub name: Option<String>,

    pub image_url: Option<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_id: item.product_id.into_i64(),
            quantity: item.quantity,
            price: to_json_number(item.price),
            name: item.product_name,
            image_url: item.image_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub user_email: String,
    pub total_amount: f64,
    pub status: String,
    pub address: String,
    pub payment_method: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(OrderWithItems { order, items }: OrderWithItems) -> Self {
        OrderResponse {
            id: order.id.into_i64(),
            user_email: order.user_email,
            total_amount: to_json_number(order.total_amount),
            status: order.status.to_string(),
            address: order.address,
            payment_method: order.payment_method,
            created_at: order.created_at.to_string(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// My Orders Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(tags("orders"), summary = "List My Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_user(&principal.user_id)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
