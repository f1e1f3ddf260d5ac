//! User Records

use jiff::Timestamp;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A customer as seen by the admin console: anyone who has placed an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub user_id: String,

    /// Email from the customer's most recent order.
    pub email: String,

    /// Registered first name, or the local part of the email when unknown.
    pub first_name: String,

    pub last_name: String,
    pub order_count: i64,
    pub first_order_at: Timestamp,
}
