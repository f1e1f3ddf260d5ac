//! App Router

use salvo::Router;

use crate::{admin, auth, health, healthcheck, me, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("api/health").get(health::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{id}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("orders").post(orders::create::handler))
                .push(Router::with_path("api/orders/me").get(orders::mine::handler))
                .push(Router::with_path("api/me/sync").post(me::sync::handler))
                .push(admin_router()),
        )
}

fn admin_router() -> Router {
    Router::with_path("api/admin")
        .hoop(auth::admin::handler)
        .push(
            Router::with_path("orders")
                .get(admin::orders::index::handler)
                .push(Router::with_path("{id}/status").patch(admin::orders::status::handler)),
        )
        .push(Router::with_path("stats").get(admin::stats::handler))
        .push(
            Router::with_path("users")
                .get(admin::users::index::handler)
                .push(Router::with_path("{user_id}").delete(admin::users::delete::handler)),
        )
}
