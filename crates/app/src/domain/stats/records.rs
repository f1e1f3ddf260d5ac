//! Stats Records

use rust_decimal::{Decimal, RoundingStrategy};

/// Store-wide counters for the admin dashboard.
///
/// Revenue sums every order regardless of status, cancelled ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminStats {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub pending_orders: i64,
}

impl AdminStats {
    /// Mean order total to the cent, or zero when there are no orders.
    #[must_use]
    pub fn average_order_value(&self) -> Decimal {
        if self.total_orders <= 0 {
            return Decimal::ZERO;
        }

        (self.total_revenue / Decimal::from(self.total_orders))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
