//! Place Order Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_app::domain::{
    orders::{
        data::{CartLine, PlaceOrder},
        records::OrderPlacement,
    },
    products::records::ProductId,
};

use crate::{
    errors::ApiError,
    extensions::*,
    money::to_json_number,
    observability::{record_checkout_rejection, record_order_placed},
    state::State,
};

/// One cart line. Any price the client sends is ignored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    /// Product id
    #[serde(alias = "product_id", alias = "productId")]
    pub id: i64,

    /// Units requested
    pub quantity: i64,
}

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,

    /// Delivery address
    #[serde(default)]
    pub address: String,

    /// Only `cod` is accepted
    #[serde(default)]
    pub payment_method: String,
}

impl From<CreateOrderRequest> for PlaceOrder {
    fn from(request: CreateOrderRequest) -> Self {
        PlaceOrder {
            lines: request
                .items
                .into_iter()
                .map(|line| CartLine {
                    product_id: ProductId::from_i64(line.id),
                    // out of range quantities fail line validation as zero
                    quantity: i32::try_from(line.quantity).unwrap_or_default(),
                })
                .collect(),
            address: request.address,
            payment_method: request.payment_method,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderPlacedResponse {
    pub message: String,
    pub order_id: i64,
    pub email: String,
    pub subtotal: f64,
    pub tax_rate: f64,

    /// Tax inclusive total charged on delivery
    pub total_amount: f64,

    pub status: String,
    pub payment_method: String,
}

impl From<OrderPlacement> for OrderPlacedResponse {
    fn from(placement: OrderPlacement) -> Self {
        OrderPlacedResponse {
            message: "Order created".to_string(),
            order_id: placement.order_id.into_i64(),
            email: placement.email,
            subtotal: to_json_number(placement.subtotal),
            tax_rate: to_json_number(placement.tax_rate),
            total_amount: to_json_number(placement.total_amount),
            status: placement.status.to_string(),
            payment_method: placement.payment_method,
        }
    }
}

/// Place Order Handler
///
/// Prices the cart from the catalog, reserves stock and records the order.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = req
        .parse_json::<CreateOrderRequest>()
        .await
        .map_err(|source| {
            debug!("rejected order body: {source}");

            record_checkout_rejection("malformed_body");

            ApiError::bad_request("Invalid order request body")
        })?;

    let placement = match state.app.orders.place_order(principal, request.into()).await {
        Ok(placement) => placement,
        Err(error) => {
            record_checkout_rejection(error.reason());

            return Err(error.into());
        }
    };

    record_order_placed();

    res.status_code(StatusCode::CREATED);

    Ok(Json(placement.into()))
}
