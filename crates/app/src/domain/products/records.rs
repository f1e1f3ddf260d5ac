//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub image_url: String,
    pub created_at: Timestamp,
}

/// Locked view of a product row used while reserving stock.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}
