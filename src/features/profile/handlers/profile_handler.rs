use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::profile::dtos::{
    ChangePasswordDto, ProfileFormData, ProfileMultipartDto, ProfileResponseDto,
};
use crate::features::profile::services::ProfileService;
use crate::shared::constants::{is_image_mime_allowed, MAX_IMAGE_SIZE};
use crate::shared::types::{ApiResponse, UploadedFile};

/// Get the authenticated admin's profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Admin profile", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    admin: AuthenticatedAdmin,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    let profile = service.get(admin.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the authenticated admin's profile
///
/// Multipart form; only the fields present are applied. An uploaded
/// `avatar` replaces the stored one.
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body(
        content = ProfileMultipartDto,
        content_type = "multipart/form-data",
        description = "Profile fields with optional avatar upload",
    ),
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Invalid form data"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    admin: AuthenticatedAdmin,
    State(service): State<Arc<ProfileService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    let mut form = ProfileFormData::default();
    let mut avatar: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "avatar" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let original_filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "avatar".to_string());

                if !is_image_mime_allowed(&content_type) {
                    return Err(AppError::Validation(format!(
                        "Avatar type {} is not allowed",
                        content_type
                    )));
                }

                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read avatar data: {}", e))
                })?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::Validation(format!(
                        "Avatar exceeds the maximum size of {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                avatar = Some(UploadedFile {
                    data: data.to_vec(),
                    original_filename,
                    content_type,
                });
            }
            "name" => form.name = Some(read_text(field, "name").await?),
            "email" => form.email = Some(read_text(field, "email").await?),
            "bio" => form.bio = Some(read_text(field, "bio").await?),
            "phone" => form.phone = Some(read_text(field, "phone").await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let profile = service.update(admin.id, form, avatar).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

/// Change the authenticated admin's password
#[utoipa::path(
    put,
    path = "/api/profile/change-password",
    tag = "profile",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Current password incorrect")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    admin: AuthenticatedAdmin,
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.change_password(admin.id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed successfully".to_string()),
        None,
    )))
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
