use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::models::AdminAccount;

/// Request DTO for admin login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Admin summary returned alongside the token and from `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummaryDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<AdminAccount> for AdminSummaryDto {
    fn from(account: AdminAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
        }
    }
}

/// Response DTO for a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub admin: AdminSummaryDto,
}
