//! Current User Handlers

pub(crate) mod sync;
