//! Storefront Domain Concerns

pub mod orders;
pub mod products;
pub mod stats;
pub mod users;
