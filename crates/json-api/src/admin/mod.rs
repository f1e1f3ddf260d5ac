//! Admin Handlers

pub(crate) mod orders;
pub(crate) mod stats;
pub(crate) mod users;
