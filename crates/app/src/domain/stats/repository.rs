//! Stats Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::stats::records::AdminStats;

const ADMIN_STATS_SQL: &str = include_str!("sql/admin_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn admin_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<AdminStats, sqlx::Error> {
        query_as::<Postgres, AdminStats>(ADMIN_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AdminStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_products: row.try_get("total_products")?,
            total_orders: row.try_get("total_orders")?,
            total_revenue: row.try_get("total_revenue")?,
            pending_orders: row.try_get("pending_orders")?,
        })
    }
}
