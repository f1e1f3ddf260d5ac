//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductId;

/// Postgres SQLSTATEs raised when a statement loses a race or runs out of
/// time; retrying the whole request is safe.
const TRANSIENT_SQLSTATES: [&str; 4] = ["40001", "40P01", "55P03", "57014"];

/// `numeric_value_out_of_range`: an order total too large for its column.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("unsupported payment method, only cash on delivery is accepted")]
    UnsupportedPaymentMethod,

    #[error("cart is empty")]
    EmptyCart,

    #[error("cart contains an invalid line")]
    InvalidCartLine,

    #[error("delivery address is required")]
    MissingAddress,

    #[error("identity is missing a user id or email")]
    IncompleteIdentity,

    #[error("product {0} not found")]
    UnknownProduct(ProductId),

    #[error(
        "insufficient stock for {name}: {available} available, {requested} requested"
    )]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        available: i32,
        requested: i32,
    },

    #[error("invalid order status: {0}")]
    InvalidStatus(String),

    #[error("order not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Whether the failure came from contention or an exhausted resource
    /// rather than from the request itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        let Self::Sql(error) = self else {
            return false;
        };

        match error {
            Error::PoolTimedOut | Error::PoolClosed | Error::Io(_) => true,
            Error::Database(db) => db
                .code()
                .is_some_and(|code| TRANSIENT_SQLSTATES.iter().any(|state| *state == code)),
            _ => false,
        }
    }

    /// Short machine-readable label for metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedPaymentMethod => "unsupported_payment_method",
            Self::EmptyCart => "empty_cart",
            Self::InvalidCartLine => "invalid_cart_line",
            Self::MissingAddress => "missing_address",
            Self::IncompleteIdentity => "incomplete_identity",
            Self::UnknownProduct(_) => "unknown_product",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::InvalidStatus(_) => "invalid_status",
            Self::NotFound => "not_found",
            Self::InvalidData => "invalid_data",
            Self::Sql(_) if self.is_transient() => "transient",
            Self::Sql(_) => "storage",
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(db) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if db.code().is_some_and(|code| code == NUMERIC_OUT_OF_RANGE) {
            return Self::InvalidData;
        }

        match DatabaseError::kind(db) {
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
