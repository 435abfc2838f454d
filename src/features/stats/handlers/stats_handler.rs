use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::stats::dtos::{
    DownloadTrendDto, OverviewDto, PlanCategoriesDto, RecentDownloadDto, TopPlanDto,
};
use crate::features::stats::services::StatsService;
use crate::shared::types::ApiResponse;

/// Headline catalog and download figures
#[utoipa::path(
    get,
    path = "/api/stats/overview",
    tag = "stats",
    responses(
        (status = 200, description = "Overview figures", body = ApiResponse<OverviewDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_overview(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<OverviewDto>>, AppError> {
    let overview = service.overview().await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// Latest recorded downloads with plan names
#[utoipa::path(
    get,
    path = "/api/stats/recent-downloads",
    tag = "stats",
    responses(
        (status = 200, description = "Recent downloads", body = ApiResponse<Vec<RecentDownloadDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_recent_downloads(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<Vec<RecentDownloadDto>>>, AppError> {
    let downloads = service.recent_downloads().await?;
    Ok(Json(ApiResponse::success(Some(downloads), None, None)))
}

/// Downloads per day over the last 30 days
#[utoipa::path(
    get,
    path = "/api/stats/download-trends",
    tag = "stats",
    responses(
        (status = 200, description = "Daily download counts", body = ApiResponse<Vec<DownloadTrendDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_download_trends(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<Vec<DownloadTrendDto>>>, AppError> {
    let trends = service.download_trends().await?;
    Ok(Json(ApiResponse::success(Some(trends), None, None)))
}

/// Free vs paid catalog split
#[utoipa::path(
    get,
    path = "/api/stats/plan-categories",
    tag = "stats",
    responses(
        (status = 200, description = "Free/paid counts", body = ApiResponse<PlanCategoriesDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_plan_categories(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<PlanCategoriesDto>>, AppError> {
    let categories = service.plan_categories().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Most-downloaded plans
#[utoipa::path(
    get,
    path = "/api/stats/top-plans",
    tag = "stats",
    responses(
        (status = 200, description = "Top plans by downloads", body = ApiResponse<Vec<TopPlanDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_top_plans(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<Vec<TopPlanDto>>>, AppError> {
    let plans = service.top_plans().await?;
    Ok(Json(ApiResponse::success(Some(plans), None, None)))
}
