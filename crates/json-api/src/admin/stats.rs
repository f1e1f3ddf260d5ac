//! Admin Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::stats::records::AdminStats;

use crate::{errors::ApiError, extensions::*, money::to_json_number, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsResponse {
    pub total_products: i64,
    pub total_orders: i64,

    /// Sum of every order total, cancelled orders included
    pub total_revenue: f64,

    pub pending_orders: i64,
    pub average_order_value: f64,
}

impl From<AdminStats> for StatsResponse {
    fn from(stats: AdminStats) -> Self {
        StatsResponse {
            total_products: stats.total_products,
            total_orders: stats.total_orders,
            total_revenue: to_json_number(stats.total_revenue),
            pending_orders: stats.pending_orders,
            average_order_value: to_json_number(stats.average_order_value()),
        }
    }
}

/// Admin Stats Handler
///
/// Dashboard counters computed from current data.
#[endpoint(tags("admin"), summary = "Get Stats", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.stats.admin_stats().await?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::stats::{MockStatsService, StatsServiceError};

    use crate::test_helpers::{Mocks, admin, service_as};

    use super::*;

    fn make_service(stats: MockStatsService) -> Service {
        service_as(
            admin(),
            Mocks {
                stats: Some(stats),
                ..Mocks::default()
            },
            Router::with_path("api/admin/stats").get(handler),
        )
    }

    #[tokio::test]
    async fn test_stats_include_average_order_value() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_admin_stats().once().return_once(|| {
            Ok(AdminStats {
                total_products: 3,
                total_orders: 2,
                total_revenue: Decimal::new(32_400, 2),
                pending_orders: 1,
            })
        });

        let body: StatsResponse = TestClient::get("http://example.com/api/admin/stats")
            .send(&make_service(stats))
            .await
            .take_json()
            .await?;

        assert_eq!(body.total_orders, 2);
        assert!((body.total_revenue - 324.0).abs() < f64::EPSILON);
        assert!((body.average_order_value - 162.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_with_no_orders_average_zero() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_admin_stats().once().return_once(|| {
            Ok(AdminStats {
                total_products: 0,
                total_orders: 0,
                total_revenue: Decimal::ZERO,
                pending_orders: 0,
            })
        });

        let body: StatsResponse = TestClient::get("http://example.com/api/admin/stats")
            .send(&make_service(stats))
            .await
            .take_json()
            .await?;

        assert!(body.average_order_value.abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_storage_error_returns_500() -> TestResult {
        let mut stats = MockStatsService::new();

        stats
            .expect_admin_stats()
            .once()
            .return_once(|| Err(StatsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/api/admin/stats")
            .send(&make_service(stats))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
