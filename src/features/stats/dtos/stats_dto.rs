use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Headline figures for the back-office dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    /// Plans in the catalog
    pub total_plans: i64,
    /// Downloads recorded across all plans
    pub total_downloads: i64,
    /// Sum of price over paid plans
    #[schema(value_type = String, example = "1249.50")]
    pub catalog_value: Decimal,
    /// Purchase requests awaiting review
    pub pending_purchases: i64,
}

/// One row of the recent-downloads feed
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentDownloadDto {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub downloaded_at: DateTime<Utc>,
}

/// Downloads recorded on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTrendDto {
    pub day: NaiveDate,
    pub downloads: i64,
}

/// Free/paid split of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanCategoriesDto {
    pub free: i64,
    pub paid: i64,
}

/// One entry of the most-downloaded-plans list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopPlanDto {
    pub id: Uuid,
    pub name: String,
    pub is_free: bool,
    #[schema(value_type = String, example = "149.99")]
    pub price: Decimal,
    pub download_count: i64,
}
