use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::stats::handlers;
use crate::features::stats::services::StatsService;

/// Bearer-gated statistics routes
pub fn routes(stats_service: Arc<StatsService>) -> Router {
    Router::new()
        .route("/api/stats/overview", get(handlers::get_overview))
        .route(
            "/api/stats/recent-downloads",
            get(handlers::get_recent_downloads),
        )
        .route(
            "/api/stats/download-trends",
            get(handlers::get_download_trends),
        )
        .route(
            "/api/stats/plan-categories",
            get(handlers::get_plan_categories),
        )
        .route("/api/stats/top-plans", get(handlers::get_top_plans))
        .with_state(stats_service)
}
