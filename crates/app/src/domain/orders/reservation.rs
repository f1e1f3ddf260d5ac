//! Stock reservation checks

use std::collections::HashMap;

use crate::domain::{
    orders::{data::CartLine, errors::OrdersServiceError, pricing::PricedLine},
    products::records::{ProductId, StockLevel},
};

/// Check merged cart lines against locked stock and price them.
///
/// Lines are checked in order and the first shortfall wins. Prices always
/// come from `locked`.
///
/// # Errors
///
/// Returns [`OrdersServiceError::UnknownProduct`] when a line has no locked
/// row, or [`OrdersServiceError::InsufficientStock`] when it asks for more
/// than is on hand.
pub fn reserve(
    lines: &[CartLine],
    locked: &[StockLevel],
) -> Result<Vec<PricedLine>, OrdersServiceError> {
    let by_id: HashMap<ProductId, &StockLevel> =
        locked.iter().map(|level| (level.id, level)).collect();

    lines
        .iter()
        .map(|line| {
            let level = by_id
                .get(&line.product_id)
                .ok_or(OrdersServiceError::UnknownProduct(line.product_id))?;

            if level.stock < line.quantity {
                return Err(OrdersServiceError::InsufficientStock {
                    product_id: level.id,
                    name: level.name.clone(),
                    available: level.stock,
                    requested: line.quantity,
                });
            }

            Ok(PricedLine {
                product_id: level.id,
                name: level.name.clone(),
                quantity: line.quantity,
                unit_price: level.price,
            })
        })
        .collect()
}
