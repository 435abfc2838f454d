use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::plans::dtos::{
    PurchaseReceiptDto, PurchaseRequestResponseDto, SubmitPurchaseDto,
};
use crate::features::plans::services::PurchaseService;
use crate::shared::types::{ApiResponse, PaginationMeta, PaginationQuery};

/// Submit a purchase request for a paid plan
#[utoipa::path(
    post,
    path = "/api/plans/purchase",
    tag = "plans",
    request_body = SubmitPurchaseDto,
    responses(
        (status = 201, description = "Purchase request recorded", body = ApiResponse<PurchaseReceiptDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn submit_purchase(
    State(service): State<Arc<PurchaseService>>,
    AppJson(dto): AppJson<SubmitPurchaseDto>,
) -> Result<(StatusCode, Json<ApiResponse<PurchaseReceiptDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let receipt = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(receipt),
            Some("Purchase request recorded".to_string()),
            None,
        )),
    ))
}

/// List purchase requests for admin review, newest first
#[utoipa::path(
    get,
    path = "/api/purchases",
    tag = "plans",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Purchase requests", body = ApiResponse<Vec<PurchaseRequestResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_purchases(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PurchaseService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<PurchaseRequestResponseDto>>>, AppError> {
    let (purchases, total) = service.list(&pagination).await?;
    let meta = PaginationMeta::new(pagination.page, pagination.limit(), total);
    Ok(Json(ApiResponse::success(Some(purchases), None, Some(meta))))
}
