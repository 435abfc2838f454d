use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::plans::handlers;
use crate::features::plans::services::{DownloadService, PlanService, PurchaseService};
use crate::shared::constants::{MAX_DOCUMENT_SIZE, MAX_IMAGE_SIZE};

// Form fields plus both uploads plus multipart framing overhead
const PLAN_FORM_BODY_LIMIT: usize = MAX_DOCUMENT_SIZE + MAX_IMAGE_SIZE + 1024 * 1024;

/// Public catalog, download-gate, and purchase-intake routes
pub fn public_routes(
    plan_service: Arc<PlanService>,
    download_service: Arc<DownloadService>,
    purchase_service: Arc<PurchaseService>,
) -> Router {
    Router::new()
        .route("/api/plans", get(handlers::list_plans))
        .route("/api/plans/{id}", get(handlers::get_plan))
        .with_state(plan_service)
        .merge(
            Router::new()
                .route("/api/plans/{id}/download", post(handlers::request_download))
                .with_state(download_service),
        )
        .merge(
            Router::new()
                .route("/api/plans/purchase", post(handlers::submit_purchase))
                .with_state(purchase_service),
        )
}

/// Bearer-gated admin CRUD and purchase-review routes
pub fn admin_routes(
    plan_service: Arc<PlanService>,
    purchase_service: Arc<PurchaseService>,
) -> Router {
    Router::new()
        .route(
            "/api/plans",
            post(handlers::create_plan).layer(DefaultBodyLimit::max(PLAN_FORM_BODY_LIMIT)),
        )
        .route(
            "/api/plans/{id}",
            put(handlers::update_plan).layer(DefaultBodyLimit::max(PLAN_FORM_BODY_LIMIT)),
        )
        .route("/api/plans/{id}", delete(handlers::delete_plan))
        .with_state(plan_service)
        .merge(
            Router::new()
                .route("/api/purchases", get(handlers::list_purchases))
                .with_state(purchase_service),
        )
}
