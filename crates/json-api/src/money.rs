//! Money rendering

use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Render an amount as a JSON number. Amounts carry two decimal places, well
/// inside what an `f64` represents exactly enough for display.
pub(crate) fn to_json_number(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}
