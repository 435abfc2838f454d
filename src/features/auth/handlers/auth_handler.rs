use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AdminSummaryDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Admin login
///
/// Exchanges email/password for a time-limited bearer token. The response
/// shape is identical for unknown emails and wrong passwords.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Current admin identity
///
/// The middleware has already verified the token and re-fetched the account,
/// so this just echoes the request extension.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current admin", body = ApiResponse<AdminSummaryDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(admin: AuthenticatedAdmin) -> Json<ApiResponse<AdminSummaryDto>> {
    Json(ApiResponse::success(
        Some(AdminSummaryDto {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }),
        None,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::routes;
    use crate::shared::test_helpers::with_admin_auth;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn me_echoes_the_authenticated_admin() {
        let router = with_admin_auth(routes::protected_routes());
        let server = TestServer::new(router).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], "admin@estateplans.test");
        assert_eq!(body["data"]["name"], "Test Admin");
    }
}
