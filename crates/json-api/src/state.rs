//! Handler state

use std::sync::Arc;

use storefront_app::context::AppContext;

/// Everything a handler reaches through the depot: the catalog, orders,
/// users, stats, health and identity services wired at startup.
///
/// Injected once at the router root and shared behind an `Arc`, so handlers
/// clone nothing but the pointer.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
