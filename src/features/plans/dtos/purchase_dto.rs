use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Request DTO for purchase intake on a paid plan
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPurchaseDto {
    pub plan_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: String,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 2000, message = "Message must not exceed 2000 characters"))]
    pub message: Option<String>,
}

/// Receipt returned after a purchase request is persisted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceiptDto {
    pub receipt_id: Uuid,
    pub status: String,
}

/// Purchase request as shown in the admin back office
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestResponseDto {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
