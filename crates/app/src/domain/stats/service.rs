//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError, records::AdminStats, repository::PgStatsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn admin_stats(&self) -> Result<AdminStats, StatsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = self.repository.admin_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Compute dashboard counters from current data.
    async fn admin_stats(&self) -> Result<AdminStats, StatsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::orders::{OrdersService, records::OrderStatus},
        test::{
            TestContext,
            helpers::{customer, insert_product, place_order},
        },
    };

    use super::*;

    #[tokio::test]
    async fn admin_stats_with_no_orders_is_zero() -> TestResult {
        let ctx = TestContext::new().await;
        insert_product(&ctx, "Chair", Decimal::new(7_500, 2), 3).await;

        let stats = ctx.stats.admin_stats().await?;

        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.pending_orders, 0);
        assert_eq!(stats.average_order_value(), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn admin_stats_counts_every_status_in_revenue() -> TestResult {
        let ctx = TestContext::new().await;
        let product = insert_product(&ctx, "Table", Decimal::new(10_000, 2), 10).await;

        let kept = place_order(&ctx, &customer("user_1", "ada@example.com"), &[(product, 1)]).await?;
        let cancelled = place_order(&ctx, &customer("user_2", "bob@example.com"), &[(product, 2)]).await?;

        ctx.orders
            .update_status(cancelled.order_id, OrderStatus::Cancelled)
            .await?;

        let stats = ctx.stats.admin_stats().await?;

        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(
            stats.total_revenue,
            kept.total_amount + cancelled.total_amount
        );
        assert_eq!(stats.average_order_value(), Decimal::new(16_200, 2));

        Ok(())
    }
}
