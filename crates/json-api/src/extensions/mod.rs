//! Depot and path helpers shared by the handlers

mod depot;
mod path_id;

pub(crate) use depot::DepotExt as _;
pub(crate) use path_id::PathIdExt as _;
