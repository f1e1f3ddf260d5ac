//! Order Items Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::{
        pricing::PricedLine,
        records::{OrderId, OrderItemRecord},
    },
    products::records::ProductId,
};

const INSERT_ORDER_ITEMS_SQL: &str = include_str!("../sql/insert_order_items.sql");
const LIST_ITEMS_FOR_ORDERS_SQL: &str = include_str!("../sql/list_items_for_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line of `order` in one statement, snapshotting prices.
    pub(crate) async fn insert_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        lines: &[PricedLine],
    ) -> Result<u64, sqlx::Error> {
        let product_ids: Vec<i64> = lines.iter().map(|l| l.product_id.into_i64()).collect();
        let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();
        let prices: Vec<Decimal> = lines.iter().map(|l| l.unit_price).collect();

        let rows_affected = query(INSERT_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .bind(product_ids)
            .bind(quantities)
            .bind(prices)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_items_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderId],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let ids: Vec<i64> = orders.iter().map(|id| id.into_i64()).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ITEMS_FOR_ORDERS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: row.try_get("quantity")?,
            price: row.try_get("price")?,
            product_name: row.try_get("product_name")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
