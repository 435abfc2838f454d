use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::stats::dtos::{
    DownloadTrendDto, OverviewDto, PlanCategoriesDto, RecentDownloadDto, TopPlanDto,
};

const RECENT_DOWNLOADS_LIMIT: i64 = 10;
const TREND_WINDOW_DAYS: i32 = 30;
const TOP_PLANS_LIMIT: i64 = 5;

/// Service computing back-office statistics from stored rows
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline figures: plan count, download count, catalog value over
    /// paid plans, and the pending purchase-request backlog.
    pub async fn overview(&self) -> Result<OverviewDto> {
        let (total_plans, total_downloads, catalog_value) =
            sqlx::query_as::<_, (i64, i64, Decimal)>(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(download_count), 0)::bigint,
                    COALESCE(SUM(price) FILTER (WHERE NOT is_free), 0)::numeric
                FROM house_plans
                "#,
            )
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to compute overview counts: {:?}", e);
                AppError::Database(e)
            })?;

        let pending_purchases = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM purchase_requests WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(OverviewDto {
            total_plans,
            total_downloads,
            catalog_value,
            pending_purchases,
        })
    }

    /// Latest downloads with the plan name joined in
    pub async fn recent_downloads(&self) -> Result<Vec<RecentDownloadDto>> {
        sqlx::query_as::<_, RecentDownloadDto>(
            r#"
            SELECT d.id, d.plan_id, hp.name AS plan_name, d.downloaded_at
            FROM downloads d
            JOIN house_plans hp ON hp.id = d.plan_id
            ORDER BY d.downloaded_at DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_DOWNLOADS_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list recent downloads: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Downloads per calendar day over the trailing window.
    /// Days with no downloads are absent rather than zero-filled.
    pub async fn download_trends(&self) -> Result<Vec<DownloadTrendDto>> {
        sqlx::query_as::<_, DownloadTrendDto>(
            r#"
            SELECT downloaded_at::date AS day, COUNT(*) AS downloads
            FROM downloads
            WHERE downloaded_at >= CURRENT_DATE - $1 * INTERVAL '1 day'
            GROUP BY downloaded_at::date
            ORDER BY day
            "#,
        )
        .bind(TREND_WINDOW_DAYS)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute download trends: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Free vs paid plan counts
    pub async fn plan_categories(&self) -> Result<PlanCategoriesDto> {
        let (free, paid) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_free),
                COUNT(*) FILTER (WHERE NOT is_free)
            FROM house_plans
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(PlanCategoriesDto { free, paid })
    }

    /// Plans ordered by download count, most downloaded first
    pub async fn top_plans(&self) -> Result<Vec<TopPlanDto>> {
        sqlx::query_as::<_, TopPlanDto>(
            r#"
            SELECT id, name, is_free, price, download_count
            FROM house_plans
            ORDER BY download_count DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(TOP_PLANS_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list top plans: {:?}", e);
            AppError::Database(e)
        })
    }
}
