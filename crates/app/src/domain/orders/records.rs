//! Order Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{orders::errors::OrdersServiceError, products::records::ProductId},
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Fulfilment status of an order.
///
/// The usual path is `pending → processing → shipped → delivered →
/// completed`, and an order may be cancelled at any point. Admins may move an
/// order between any two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrdersServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| OrdersServiceError::InvalidStatus(value.to_string()))
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: String,
    pub user_email: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub address: String,
    pub payment_method: String,
    pub created_at: Timestamp,
}

/// Order Item Record
///
/// `quantity` and `price` are the purchase-time snapshot. Name and image
/// come from the current catalog and are absent once the product is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub product_name: Option<String>,
    pub image_url: Option<String>,
}

/// An order together with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// Admin listing row.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order: OrderRecord,
    pub item_count: i64,
}

/// Confirmation returned once an order has been committed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlacement {
    pub order_id: OrderId,
    pub email: String,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: String,
}
