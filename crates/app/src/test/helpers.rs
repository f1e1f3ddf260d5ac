//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query_scalar;

use crate::{
    auth::{Principal, Role},
    domain::{
        orders::{
            OrdersService, OrdersServiceError,
            data::{CartLine, PlaceOrder},
            records::OrderPlacement,
        },
        products::records::ProductId,
    },
    test::TestContext,
};

pub(crate) fn customer(user_id: &str, email: &str) -> Principal {
    Principal {
        user_id: user_id.to_string(),
        email: Some(email.to_string()),
        first_name: None,
        last_name: None,
        role: Role::Customer,
    }
}

/// Catalog writes are out of band, so tests seed products directly.
pub(crate) async fn insert_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock: i32,
) -> ProductId {
    let id: i64 = query_scalar(
        "INSERT INTO products (name, category, price, stock) \
         VALUES ($1, 'test', $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(stock)
    .fetch_one(ctx.db.pool())
    .await
    .expect("Failed to insert test product");

    ProductId::from_i64(id)
}

pub(crate) async fn stock_of(ctx: &TestContext, product: ProductId) -> i32 {
    query_scalar("SELECT stock FROM products WHERE id = $1")
        .bind(product.into_i64())
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to read product stock")
}

pub(crate) async fn count_rows(ctx: &TestContext, table: &str) -> i64 {
    assert!(
        ["products", "users", "orders", "order_items"].contains(&table),
        "unexpected table {table}"
    );

    query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count rows")
}

pub(crate) async fn place_order(
    ctx: &TestContext,
    principal: &Principal,
    lines: &[(ProductId, i32)],
) -> Result<OrderPlacement, OrdersServiceError> {
    ctx.orders
        .place_order(
            principal,
            PlaceOrder {
                lines: lines
                    .iter()
                    .map(|&(product_id, quantity)| CartLine {
                        product_id,
                        quantity,
                    })
                    .collect(),
                address: "1 Market Street".to_string(),
                payment_method: "cod".to_string(),
            },
        )
        .await
}
