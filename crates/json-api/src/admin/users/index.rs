//! Admin Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::records::CustomerRecord;

use crate::{errors::ApiError, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerResponse {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub order_count: i64,

    /// Time of the customer's first order
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerResponse {
            user_id: customer.user_id,
            email: customer.email,
            first_name: customer.first_name,
            last_name: customer.last_name,
            order_count: customer.order_count,
            created_at: customer.first_order_at.to_string(),
        }
    }
}

/// Admin Customer Index Handler
///
/// Lists everyone who has placed an order.
#[endpoint(tags("admin"), summary = "List Customers", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customers = state.app.users.list_customers().await?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}
