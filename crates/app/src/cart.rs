//! Shopper cart
//!
//! The cart lives with the client and is only a staging area: it clamps
//! quantities to the stock it last saw, but checkout re-prices and re-checks
//! every line against locked inventory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    orders::{
        data::CartLine,
        pricing::{TAX_RATE, total_with_tax},
    },
    products::records::{ProductId, ProductRecord},
};

/// A product snapshot plus the quantity the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,

    /// Stock level when the product was added.
    pub stock: i32,

    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`. Returns `false` when stock is exhausted.
    pub fn add(&mut self, product: &ProductRecord) -> bool {
        if let Some(item) = self.item_mut(product.id) {
            if item.quantity >= item.stock {
                return false;
            }

            item.quantity += 1;

            return true;
        }

        if product.stock <= 0 {
            return false;
        }

        self.items.push(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            stock: product.stock,
            quantity: 1,
        });

        true
    }

    pub fn remove(&mut self, product: ProductId) {
        self.items.retain(|item| item.product_id != product);
    }

    /// Set the quantity for `product`, clamped to known stock. Zero or less
    /// removes the line; unknown products are ignored.
    pub fn update_quantity(&mut self, product: ProductId, quantity: i32) {
        if quantity <= 0 {
            self.remove(product);
            return;
        }

        if let Some(item) = self.item_mut(product) {
            item.quantity = quantity.min(item.stock);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Display subtotal at the prices the client last saw.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.total() - self.subtotal()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        total_with_tax(self.subtotal())
    }

    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        TAX_RATE
    }

    /// The lines submitted at checkout; prices stay behind.
    #[must_use]
    pub fn checkout_lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|item| CartLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }

    fn item_mut(&mut self, product: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product)
    }
}
