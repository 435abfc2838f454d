use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::plans::dtos::DownloadResponseDto;
use crate::features::plans::services::DownloadService;
use crate::shared::types::ApiResponse;

/// Request a plan download
///
/// Free plans resolve immediately; paid plans require a purchase request
/// on record, otherwise the response is 402 Payment Required.
#[utoipa::path(
    post,
    path = "/api/plans/{id}/download",
    tag = "plans",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Download granted", body = ApiResponse<DownloadResponseDto>),
        (status = 402, description = "Purchase required for this plan"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn request_download(
    State(service): State<Arc<DownloadService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DownloadResponseDto>>, AppError> {
    let download = service.request_download(id).await?;
    Ok(Json(ApiResponse::success(Some(download), None, None)))
}
