//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        orders::{
            data::{COD_PAYMENT_METHOD, NewOrder, PlaceOrder},
            errors::OrdersServiceError,
            pricing::Quote,
            records::{
                OrderId, OrderItemRecord, OrderPlacement, OrderStatus, OrderSummary,
                OrderWithItems,
            },
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            reservation,
        },
        products::{records::ProductId, repository::PgProductsRepository},
        users::repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    products: PgProductsRepository,
    users: PgUsersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            products: PgProductsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        principal: &Principal,
        order: PlaceOrder,
    ) -> Result<OrderPlacement, OrdersServiceError> {
        let order = order.validate(principal)?;

        let mut tx = self.db.begin_transaction().await?;

        self.users.upsert_user(&mut tx, &order.user).await?;

        let product_ids: Vec<ProductId> = order.lines.iter().map(|l| l.product_id).collect();

        let locked = self.products.lock_stock(&mut tx, &product_ids).await?;

        let quote = Quote::new(reservation::reserve(&order.lines, &locked)?);

        let record = self
            .orders
            .insert_order(
                &mut tx,
                &NewOrder {
                    user_id: order.user.user_id,
                    user_email: order.user.email,
                    total_amount: quote.total,
                    address: order.address,
                    payment_method: COD_PAYMENT_METHOD.to_string(),
                },
            )
            .await?;

        self.items
            .insert_items(&mut tx, record.id, &quote.lines)
            .await?;

        let deductions: Vec<(ProductId, i32)> = quote
            .lines
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect();

        self.products.decrement_stock(&mut tx, &deductions).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %record.id,
            user_id = %record.user_id,
            total_amount = %record.total_amount,
            lines = quote.lines.len(),
            "order placed"
        );

        Ok(OrderPlacement {
            order_id: record.id,
            email: record.user_email,
            subtotal: quote.subtotal,
            tax_rate: quote.tax_rate,
            total_amount: record.total_amount,
            status: record.status,
            payment_method: record.payment_method,
        })
    }

    async fn list_orders_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_orders_for_user(&mut tx, user_id).await?;

        let order_ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();

        let items = self
            .items
            .list_items_for_orders(&mut tx, &order_ids)
            .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<OrderId, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                items: items_by_order.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.orders.update_status(&mut tx, order, status).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(order_id = %order, %status, "order status updated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate a checkout, reserve stock and record the order atomically.
    ///
    /// Either every effect is committed (user upsert, order, items, stock
    /// deduction) or none is.
    async fn place_order(
        &self,
        principal: &Principal,
        order: PlaceOrder,
    ) -> Result<OrderPlacement, OrdersServiceError>;

    /// The user's orders, newest first, with their items.
    async fn list_orders_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError>;

    /// Every order, newest first, with its item count.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// Set an order's status.
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::orders::data::CartLine,
        test::{
            TestContext,
            helpers::{count_rows, customer, insert_product, place_order, stock_of},
        },
    };

    use super::*;

    #[tokio::test]
    async fn place_order_prices_from_catalog_and_deducts_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Headphones", Decimal::new(10_000, 2), 10).await;

        let placement = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 3)]).await?;

        assert_eq!(placement.subtotal, Decimal::new(30_000, 2));
        assert_eq!(placement.total_amount, Decimal::new(32_400, 2));
        assert_eq!(placement.tax_rate, Decimal::new(8, 2));
        assert_eq!(placement.status, OrderStatus::Pending);
        assert_eq!(placement.payment_method, "cod");
        assert_eq!(placement.email, "ada@example.com");
        assert_eq!(stock_of(&ctx, product).await, 7);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_snapshots_item_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = customer("user_1", "ada@example.com");
        let product = insert_product(&ctx, "Scarf", Decimal::new(2_500, 2), 5).await;

        place_order(&ctx, &principal, &[(product, 2)]).await?;

        sqlx::query("UPDATE products SET price = 99.00 WHERE id = $1")
            .bind(product.into_i64())
            .execute(ctx.db.pool())
            .await?;

        let orders = ctx.orders.list_orders_for_user("user_1").await?;

        let items = &orders.first().expect("one order").items;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|i| i.price), Some(Decimal::new(2_500, 2)));
        assert_eq!(items.first().map(|i| i.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_reports_shortfall_and_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Lamp", Decimal::new(4_000, 2), 2).await;

        let result = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 5)]).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    available: 2,
                    requested: 5,
                    ..
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(stock_of(&ctx, product).await, 2);
        assert_eq!(count_rows(&ctx, "orders").await, 0);
        assert_eq!(count_rows(&ctx, "users").await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn failure_on_a_later_line_rolls_back_everything() -> TestResult {
        let ctx = TestContext::new().await;
        let a = insert_product(&ctx, "A", Decimal::new(100, 2), 10).await;
        let b = insert_product(&ctx, "B", Decimal::new(200, 2), 1).await;
        let c = insert_product(&ctx, "C", Decimal::new(300, 2), 10).await;

        let result = place_order(
            &ctx,
            &customer("user_1", "ada@example.com"),
            &[(a, 1), (b, 2), (c, 1)],
        )
        .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InsufficientStock { .. })
        ));
        assert_eq!(stock_of(&ctx, a).await, 10);
        assert_eq!(stock_of(&ctx, b).await, 1);
        assert_eq!(stock_of(&ctx, c).await, 10);
        assert_eq!(count_rows(&ctx, "orders").await, 0);
        assert_eq!(count_rows(&ctx, "order_items").await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn total_beyond_column_range_is_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let mut lines = Vec::new();

        for n in 0..5 {
            let product = insert_product(
                &ctx,
                &format!("Yacht {n}"),
                Decimal::new(9_999_999_999, 2),
                i32::MAX,
            )
            .await;

            lines.push((product, i32::MAX));
        }

        let result = place_order(&ctx, &customer("user_1", "ada@example.com"), &lines).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
        assert_eq!(count_rows(&ctx, "orders").await, 0);
        assert_eq!(stock_of(&ctx, lines[0].0).await, i32::MAX);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Real", Decimal::new(100, 2), 10).await;

        let result = place_order(
            &ctx,
            &customer("user_1", "ada@example.com"),
            &[(product, 1), (ProductId::from_i64(987_654), 1)],
        )
        .await;

        assert!(
            matches!(result, Err(OrdersServiceError::UnknownProduct(id)) if id == ProductId::from_i64(987_654)),
            "expected UnknownProduct, got {result:?}"
        );
        assert_eq!(stock_of(&ctx, product).await, 10);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_lines_are_merged_before_checking_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Socks", Decimal::new(500, 2), 4).await;

        let result = place_order(
            &ctx,
            &customer("user_1", "ada@example.com"),
            &[(product, 2), (product, 3)],
        )
        .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    available: 4,
                    requested: 5,
                    ..
                })
            ),
            "expected merged quantity to exceed stock, got {result:?}"
        );

        let placement = place_order(
            &ctx,
            &customer("user_1", "ada@example.com"),
            &[(product, 2), (product, 2)],
        )
        .await?;

        assert_eq!(placement.subtotal, Decimal::new(2_000, 2));
        assert_eq!(stock_of(&ctx, product).await, 0);
        assert_eq!(count_rows(&ctx, "order_items").await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_has_no_side_effects() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .place_order(
                &customer("user_1", "ada@example.com"),
                PlaceOrder {
                    lines: Vec::<CartLine>::new(),
                    address: "1 Market Street".to_string(),
                    payment_method: "cod".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(OrdersServiceError::EmptyCart)));
        assert_eq!(count_rows(&ctx, "users").await, 0);
        assert_eq!(count_rows(&ctx, "orders").await, 0);
    }

    #[tokio::test]
    async fn concurrent_orders_never_oversell() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Limited", Decimal::new(1_000, 2), 10).await;

        let mut handles = Vec::new();

        for n in 0..6 {
            let orders = ctx.orders.clone();
            let principal = customer(&format!("user_{n}"), &format!("user{n}@example.com"));

            handles.push(tokio::spawn(async move {
                orders
                    .place_order(
                        &principal,
                        PlaceOrder {
                            lines: vec![CartLine {
                                product_id: product,
                                quantity: 3,
                            }],
                            address: "1 Market Street".to_string(),
                            payment_method: "cod".to_string(),
                        },
                    )
                    .await
            }));
        }

        let mut succeeded = 0;
        let mut rejected = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => succeeded += 1,
                Err(OrdersServiceError::InsufficientStock { .. }) => rejected += 1,
                Err(other) => return Err(other.into()),
            }
        }

        assert_eq!(succeeded, 3);
        assert_eq!(rejected, 3);
        assert_eq!(stock_of(&ctx, product).await, 1);
        assert_eq!(count_rows(&ctx, "orders").await, 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_for_user_returns_own_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Tea", Decimal::new(350, 2), 20).await;

        let first = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 1)]).await?;
        let second = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 2)]).await?;
        place_order(&ctx, &customer("user_2", "bob@example.com"), &[(product, 1)]).await?;

        let orders = ctx.orders.list_orders_for_user("user_1").await?;

        let ids: Vec<OrderId> = orders.iter().map(|o| o.order.id).collect();

        assert_eq!(ids, vec![second.order_id, first.order_id]);
        assert!(orders.iter().all(|o| o.items.len() == 1));
        assert_eq!(
            orders
                .first()
                .and_then(|o| o.items.first())
                .and_then(|i| i.product_name.clone()),
            Some("Tea".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn placed_orders_are_listed_under_the_placing_user_id() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Mug", Decimal::new(800, 2), 5).await;
        let principal = customer("user_7 ", "grace@example.com");

        let placement = place_order(&ctx, &principal, &[(product, 1)]).await?;

        let orders = ctx.orders.list_orders_for_user(&principal.user_id).await?;

        assert_eq!(
            orders.iter().map(|o| o.order.id).collect::<Vec<_>>(),
            vec![placement.order_id],
            "order should be listed for the id that placed it"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_counts_items() -> TestResult {
        let ctx = TestContext::new().await;
        let a = insert_product(&ctx, "A", Decimal::new(100, 2), 10).await;
        let b = insert_product(&ctx, "B", Decimal::new(100, 2), 10).await;

        let placement = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(a, 1), (b, 4)]).await?;

        let orders = ctx.orders.list_orders().await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|o| o.order.id), Some(placement.order_id));
        assert_eq!(orders.first().map(|o| o.item_count), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn update_status_allows_any_known_status() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Vase", Decimal::new(1_200, 2), 3).await;

        let placement = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 1)]).await?;

        ctx.orders
            .update_status(placement.order_id, OrderStatus::Delivered)
            .await?;
        ctx.orders
            .update_status(placement.order_id, OrderStatus::Pending)
            .await?;

        let orders = ctx.orders.list_orders().await?;

        assert_eq!(
            orders.first().map(|o| o.order.status),
            Some(OrderStatus::Pending)
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderId::from_i64(424_242), OrderStatus::Shipped)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
