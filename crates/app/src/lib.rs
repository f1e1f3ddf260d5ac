//! Storefront domain, persistence and identity modules.

pub mod auth;
pub mod cart;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;
pub mod ids;

#[cfg(test)]
mod test;
