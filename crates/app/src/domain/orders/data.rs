//! Orders Data

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    auth::Principal,
    domain::{
        orders::errors::OrdersServiceError, products::records::ProductId, users::data::NewUser,
    },
};

/// The only payment method accepted at checkout.
pub const COD_PAYMENT_METHOD: &str = "cod";

/// One requested product and quantity, as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Checkout request. Client-side prices and totals are never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub lines: Vec<CartLine>,
    pub address: String,
    pub payment_method: String,
}

/// A checkout request that passed every check that needs no storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub user: NewUser,

    /// One line per product, ordered by product id.
    pub lines: Vec<CartLine>,

    pub address: String,
}

/// Insert payload for the orders table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub user_email: String,
    pub total_amount: Decimal,
    pub address: String,
    pub payment_method: String,
}

impl PlaceOrder {
    /// Check the request and the principal, failing on the first problem.
    ///
    /// # Errors
    ///
    /// Returns the validation error for the first failed check, in this
    /// order: payment method, cart contents, address, identity.
    pub fn validate(&self, principal: &Principal) -> Result<ValidatedOrder, OrdersServiceError> {
        if self.payment_method != COD_PAYMENT_METHOD {
            return Err(OrdersServiceError::UnsupportedPaymentMethod);
        }

        if self.lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        if self
            .lines
            .iter()
            .any(|line| !line.product_id.is_valid() || line.quantity <= 0)
        {
            return Err(OrdersServiceError::InvalidCartLine);
        }

        let address = self.address.trim();

        if address.is_empty() {
            return Err(OrdersServiceError::MissingAddress);
        }

        let user = NewUser::from_principal(principal).ok_or(OrdersServiceError::IncompleteIdentity)?;

        Ok(ValidatedOrder {
            user,
            lines: merge_lines(&self.lines)?,
            address: address.to_string(),
        })
    }
}

/// Collapse repeated products into one line each, summing quantities.
///
/// # Errors
///
/// Returns [`OrdersServiceError::InvalidCartLine`] if a summed quantity
/// overflows.
pub fn merge_lines(lines: &[CartLine]) -> Result<Vec<CartLine>, OrdersServiceError> {
    let mut merged: BTreeMap<ProductId, i32> = BTreeMap::new();

    for line in lines {
        let quantity = merged.entry(line.product_id).or_insert(0);

        *quantity = quantity
            .checked_add(line.quantity)
            .ok_or(OrdersServiceError::InvalidCartLine)?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| CartLine {
            product_id,
            quantity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::auth::Role;

    use super::*;

    fn line(product: i64, quantity: i32) -> CartLine {
        CartLine {
            product_id: ProductId::from_i64(product),
            quantity,
        }
    }

    fn principal() -> Principal {
        Principal {
            user_id: "user_1".to_string(),
            email: Some("ada@example.com".to_string()),
            first_name: None,
            last_name: None,
            role: Role::Customer,
        }
    }

    fn order(lines: Vec<CartLine>) -> PlaceOrder {
        PlaceOrder {
            lines,
            address: "1 Market Street".to_string(),
            payment_method: COD_PAYMENT_METHOD.to_string(),
        }
    }

    #[test]
    fn repeated_products_are_summed() -> Result<(), OrdersServiceError> {
        let merged = merge_lines(&[line(5, 2), line(5, 3)])?;

        assert_eq!(merged, vec![line(5, 5)]);

        Ok(())
    }

    #[test]
    fn merged_lines_are_ordered_by_product() -> Result<(), OrdersServiceError> {
        let merged = merge_lines(&[line(9, 1), line(2, 4), line(9, 1)])?;

        assert_eq!(merged, vec![line(2, 4), line(9, 2)]);

        Ok(())
    }

    #[test]
    fn overflowing_quantities_are_rejected() {
        let result = merge_lines(&[line(1, i32::MAX), line(1, 1)]);

        assert!(matches!(result, Err(OrdersServiceError::InvalidCartLine)));
    }

    #[test]
    fn payment_method_is_checked_first() {
        let request = PlaceOrder {
            lines: Vec::new(),
            address: String::new(),
            payment_method: "card".to_string(),
        };

        assert!(matches!(
            request.validate(&principal()),
            Err(OrdersServiceError::UnsupportedPaymentMethod)
        ));
    }

    #[test]
    fn payment_method_must_match_exactly() {
        for method in [" cod ", "COD", "cod\n"] {
            let request = PlaceOrder {
                payment_method: method.to_string(),
                ..order(vec![line(1, 1)])
            };

            assert!(
                matches!(
                    request.validate(&principal()),
                    Err(OrdersServiceError::UnsupportedPaymentMethod)
                ),
                "{method:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(
            order(Vec::new()).validate(&principal()),
            Err(OrdersServiceError::EmptyCart)
        ));
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        assert!(matches!(
            order(vec![line(1, 0)]).validate(&principal()),
            Err(OrdersServiceError::InvalidCartLine)
        ));
        assert!(matches!(
            order(vec![line(0, 1)]).validate(&principal()),
            Err(OrdersServiceError::InvalidCartLine)
        ));
    }

    #[test]
    fn blank_address_is_rejected() {
        let request = PlaceOrder {
            address: "   ".to_string(),
            ..order(vec![line(1, 1)])
        };

        assert!(matches!(
            request.validate(&principal()),
            Err(OrdersServiceError::MissingAddress)
        ));
    }

    #[test]
    fn principal_without_email_is_rejected() {
        let principal = Principal {
            email: None,
            ..principal()
        };

        assert!(matches!(
            order(vec![line(1, 1)]).validate(&principal),
            Err(OrdersServiceError::IncompleteIdentity)
        ));
    }

    #[test]
    fn valid_request_is_trimmed_and_merged() -> Result<(), OrdersServiceError> {
        let request = PlaceOrder {
            address: "  1 Market Street ".to_string(),
            ..order(vec![line(5, 2), line(5, 3)])
        };

        let validated = request.validate(&principal())?;

        assert_eq!(validated.address, "1 Market Street");
        assert_eq!(validated.lines, vec![line(5, 5)]);
        assert_eq!(validated.user.email, "ada@example.com");

        Ok(())
    }
}
