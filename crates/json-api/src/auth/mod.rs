//! Authentication

pub(crate) mod admin;
pub(crate) mod middleware;
