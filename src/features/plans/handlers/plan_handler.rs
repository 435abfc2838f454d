use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::plans::dtos::{
    DeletePlanResponseDto, ListPlansQuery, PlanFormData, PlanMultipartDto, PlanResponseDto,
};
use crate::features::plans::services::PlanService;
use crate::shared::constants::{
    is_document_mime_allowed, is_image_mime_allowed, MAX_DOCUMENT_SIZE, MAX_IMAGE_SIZE,
};
use crate::shared::types::{ApiResponse, PaginationMeta, UploadedFile};

/// List house plans
///
/// Public catalog listing with pagination, substring search on
/// name/description, and an optional free/paid filter.
#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "plans",
    params(ListPlansQuery),
    responses(
        (status = 200, description = "Paginated list of plans", body = ApiResponse<Vec<PlanResponseDto>>)
    )
)]
pub async fn list_plans(
    State(service): State<Arc<PlanService>>,
    Query(query): Query<ListPlansQuery>,
) -> Result<Json<ApiResponse<Vec<PlanResponseDto>>>, AppError> {
    let (plans, total) = service.list(&query).await?;
    let meta = PaginationMeta::new(query.page, query.limit(), total);

    Ok(Json(ApiResponse::success(Some(plans), None, Some(meta))))
}

/// Get a single house plan
#[utoipa::path(
    get,
    path = "/api/plans/{id}",
    tag = "plans",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan details", body = ApiResponse<PlanResponseDto>),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(
    State(service): State<Arc<PlanService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PlanResponseDto>>, AppError> {
    let plan = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(plan), None, None)))
}

/// Create a house plan
///
/// Accepts multipart/form-data with the plan fields plus optional
/// `image` (jpeg/png/gif/webp) and `file` (pdf/zip/rar) uploads.
#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "plans",
    request_body(
        content = PlanMultipartDto,
        content_type = "multipart/form-data",
        description = "Plan fields with optional image and document uploads",
    ),
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanResponseDto>),
        (status = 400, description = "Invalid form data"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_plan(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PlanService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PlanResponseDto>>), AppError> {
    let (form, image, document) = collect_plan_form(multipart).await?;
    let dto = form.finish()?;

    let plan = service.create(dto, image, document).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(plan),
            Some("Plan created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a house plan
///
/// Full-field update over multipart/form-data; uploaded files replace
/// the stored ones, omitted files keep the existing references.
#[utoipa::path(
    put,
    path = "/api/plans/{id}",
    tag = "plans",
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body(
        content = PlanMultipartDto,
        content_type = "multipart/form-data",
        description = "Plan fields with optional replacement uploads",
    ),
    responses(
        (status = 200, description = "Plan updated", body = ApiResponse<PlanResponseDto>),
        (status = 400, description = "Invalid form data"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Plan not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_plan(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PlanService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PlanResponseDto>>, AppError> {
    let (form, image, document) = collect_plan_form(multipart).await?;
    let dto = form.finish()?;

    let plan = service.update(id, dto, image, document).await?;
    Ok(Json(ApiResponse::success(
        Some(plan),
        Some("Plan updated successfully".to_string()),
        None,
    )))
}

/// Delete a house plan
#[utoipa::path(
    delete,
    path = "/api/plans/{id}",
    tag = "plans",
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan deleted", body = ApiResponse<DeletePlanResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Plan not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_plan(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PlanService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletePlanResponseDto>>, AppError> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletePlanResponseDto { deleted: true }),
        Some("Plan deleted successfully".to_string()),
        None,
    )))
}

/// Drain the multipart stream into raw form fields plus the two
/// optional uploads, validating MIME type and size per upload slot.
async fn collect_plan_form(
    mut multipart: Multipart,
) -> Result<(PlanFormData, Option<UploadedFile>, Option<UploadedFile>), AppError> {
    let mut form = PlanFormData::default();
    let mut image: Option<UploadedFile> = None;
    let mut document: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let uploaded = read_upload(field).await?;
                if !is_image_mime_allowed(&uploaded.content_type) {
                    return Err(AppError::Validation(format!(
                        "Image type {} is not allowed",
                        uploaded.content_type
                    )));
                }
                if uploaded.data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::Validation(format!(
                        "Image exceeds the maximum size of {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }
                image = Some(uploaded);
            }
            "file" => {
                let uploaded = read_upload(field).await?;
                if !is_document_mime_allowed(&uploaded.content_type) {
                    return Err(AppError::Validation(format!(
                        "Document type {} is not allowed",
                        uploaded.content_type
                    )));
                }
                if uploaded.data.len() > MAX_DOCUMENT_SIZE {
                    return Err(AppError::Validation(format!(
                        "Document exceeds the maximum size of {} bytes",
                        MAX_DOCUMENT_SIZE
                    )));
                }
                document = Some(uploaded);
            }
            "name" => form.name = Some(read_text(field, "name").await?),
            "description" => form.description = Some(read_text(field, "description").await?),
            "length" => form.length = Some(parse_decimal(field, "length").await?),
            "width" => form.width = Some(parse_decimal(field, "width").await?),
            "area" => form.area = Some(parse_decimal(field, "area").await?),
            "bedrooms" => form.bedrooms = Some(parse_int(field, "bedrooms").await?),
            "bathrooms" => form.bathrooms = Some(parse_int(field, "bathrooms").await?),
            "floors" => form.floors = Some(parse_int(field, "floors").await?),
            "price" => form.price = Some(parse_decimal(field, "price").await?),
            "is_free" => {
                let text = read_text(field, "is_free").await?;
                form.is_free = Some(matches!(text.to_lowercase().as_str(), "true" | "1"));
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok((form, image, document))
}

async fn read_upload(field: axum::extract::multipart::Field<'_>) -> Result<UploadedFile, AppError> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let original_filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read upload bytes: {}", e);
        AppError::BadRequest(format!("Failed to read uploaded file: {}", e))
    })?;

    Ok(UploadedFile {
        data: data.to_vec(),
        original_filename,
        content_type,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}

async fn parse_decimal(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<Decimal, AppError> {
    let text = read_text(field, name).await?;
    Decimal::from_str(text.trim())
        .map_err(|_| AppError::Validation(format!("{} must be a valid number", name)))
}

async fn parse_int(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<i32, AppError> {
    let text = read_text(field, name).await?;
    text.trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation(format!("{} must be a valid integer", name)))
}
