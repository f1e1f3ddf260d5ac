//! Order pricing

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::products::records::ProductId;

/// Flat sales tax applied to every order (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// A cart line priced from a locked product row.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl PricedLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Server-side totals for a set of priced lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub total: Decimal,
}

impl Quote {
    #[must_use]
    pub fn new(lines: Vec<PricedLine>) -> Self {
        let subtotal = lines.iter().map(PricedLine::line_total).sum();

        Self {
            lines,
            subtotal,
            tax_rate: TAX_RATE,
            total: total_with_tax(subtotal),
        }
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.total - self.subtotal
    }
}

/// `subtotal` plus tax, rounded half away from zero to whole cents.
#[must_use]
pub fn total_with_tax(subtotal: Decimal) -> Decimal {
    (subtotal * (Decimal::ONE + TAX_RATE))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(product: i64, quantity: i32, cents: i64) -> PricedLine {
        PricedLine {
            product_id: ProductId::from_i64(product),
            name: format!("Product {product}"),
            quantity,
            unit_price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn tax_rate_is_eight_percent() {
        assert_eq!(TAX_RATE, Decimal::new(8, 2));
    }

    #[test]
    fn three_at_one_hundred_totals_three_twenty_four() {
        let quote = Quote::new(vec![priced(1, 3, 10_000)]);

        assert_eq!(quote.subtotal, Decimal::new(30_000, 2));
        assert_eq!(quote.total, Decimal::new(32_400, 2));
        assert_eq!(quote.tax(), Decimal::new(2_400, 2));
    }

    #[test]
    fn subtotal_sums_every_line() {
        let quote = Quote::new(vec![priced(1, 2, 1_999), priced(2, 1, 501)]);

        assert_eq!(quote.subtotal, Decimal::new(4_499, 2));
        assert_eq!(quote.total, Decimal::new(4_859, 2));
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        // 0.375 * 1.08 = 0.405
        assert_eq!(total_with_tax(Decimal::new(375, 3)), Decimal::new(41, 2));
        // 1.125 * 1.08 = 1.215
        assert_eq!(total_with_tax(Decimal::new(1_125, 3)), Decimal::new(122, 2));
    }

    #[test]
    fn empty_quote_is_zero() {
        let quote = Quote::new(Vec::new());

        assert_eq!(quote.subtotal, Decimal::ZERO);
        assert_eq!(quote.total, Decimal::ZERO);
    }
}
