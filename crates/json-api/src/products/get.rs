//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::{ProductId, ProductRecord};

use crate::{errors::ApiError, extensions::*, money::to_json_number, state::State};

const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    pub name: String,
    pub category: String,

    /// Unit price
    pub price: f64,

    /// Units available to order
    pub stock: i32,

    pub description: String,
    pub image_url: String,

    /// The date and time the product was created
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            name: product.name,
            category: product.category,
            price: to_json_number(product.price),
            stock: product.stock,
            description: product.description,
            image_url: product.image_url,
            created_at: product.created_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id: ProductId = id.into_id(PRODUCT_NOT_FOUND)?;

    let product = state.app.products.get_product(id).await?;

    Ok(Json(product.into()))
}
