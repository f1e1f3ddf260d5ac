//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    auth::{MockIdentityProvider, Principal, Role},
    context::AppContext,
    domain::{
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ProductId, ProductRecord},
        },
        stats::MockStatsService,
        users::MockUsersService,
    },
    health::MockHealthService,
};

use crate::state::State;

pub(crate) const TEST_USER_ID: &str = "user_2test";
pub(crate) const TEST_ADMIN_ID: &str = "user_2admin";

pub(crate) fn customer() -> Principal {
    Principal {
        user_id: TEST_USER_ID.to_string(),
        email: Some("ada@example.com".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        role: Role::Customer,
    }
}

pub(crate) fn admin() -> Principal {
    Principal {
        user_id: TEST_ADMIN_ID.to_string(),
        email: Some("ops@example.com".to_string()),
        first_name: None,
        last_name: None,
        role: Role::Admin,
    }
}

/// Stand in for the auth middleware by placing `principal` in the depot.
pub(crate) fn with_principal(principal: Principal) -> impl Handler {
    inject(principal)
}

pub(crate) fn make_product(id: i64, cents: i64, stock: i32) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        name: format!("Product {id}"),
        category: "furniture".to_string(),
        price: Decimal::new(cents, 2),
        stock,
        description: String::new(),
        image_url: format!("/images/{id}.png"),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_identity_mock() -> MockIdentityProvider {
    let mut identity = MockIdentityProvider::new();

    identity.expect_authenticate_bearer().never();

    identity
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders_for_user().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();

    orders
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_sync_user().never();
    users.expect_list_customers().never();
    users.expect_delete_customer().never();

    users
}

fn strict_stats_mock() -> MockStatsService {
    let mut stats = MockStatsService::new();

    stats.expect_admin_stats().never();

    stats
}

fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_check_database().never();

    health
}

/// Services for a test; anything left unset refuses every call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: Option<MockProductsService>,
    pub(crate) orders: Option<MockOrdersService>,
    pub(crate) users: Option<MockUsersService>,
    pub(crate) stats: Option<MockStatsService>,
    pub(crate) health: Option<MockHealthService>,
    pub(crate) identity: Option<MockIdentityProvider>,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products.unwrap_or_else(strict_products_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            stats: Arc::new(self.stats.unwrap_or_else(strict_stats_mock)),
            health: Arc::new(self.health.unwrap_or_else(strict_health_mock)),
            identity: Arc::new(self.identity.unwrap_or_else(strict_identity_mock)),
        })
    }
}

pub(crate) fn state_with_identity(identity: MockIdentityProvider) -> Arc<State> {
    Mocks {
        identity: Some(identity),
        ..Mocks::default()
    }
    .into_state()
}

/// A service with `mocks` injected and no authenticated principal.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service with `mocks` injected that acts on behalf of `principal`.
pub(crate) fn service_as(principal: Principal, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(with_principal(principal))
            .push(route),
    )
}
