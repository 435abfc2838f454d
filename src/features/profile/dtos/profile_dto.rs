use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::AdminAccount;
use crate::shared::validation::PHONE_REGEX;

/// Admin account as exposed over the profile endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminAccount> for ProfileResponseDto {
    fn from(admin: AdminAccount) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            bio: admin.bio,
            phone: admin.phone,
            avatar_url: admin.avatar_url,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

/// Text fields collected from the profile-update multipart form.
///
/// All fields are optional; absent fields leave the stored value alone.
#[derive(Debug, Default)]
pub struct ProfileFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}

impl ProfileFormData {
    /// Reject present-but-invalid values; absence is fine.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Name must not be empty".to_string()));
            }
        }
        if let Some(email) = &self.email {
            if !validator::ValidateEmail::validate_email(&email.as_str()) {
                return Err(AppError::Validation("Invalid email format".to_string()));
            }
        }
        if let Some(phone) = &self.phone {
            if !phone.trim().is_empty() && !PHONE_REGEX.is_match(phone.trim()) {
                return Err(AppError::Validation("Invalid phone number".to_string()));
            }
        }
        Ok(())
    }
}

/// OpenAPI schema describing the profile-update multipart form.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProfileMultipartDto {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    pub bio: Option<String>,
    #[schema(example = "+46701234567")]
    pub phone: Option<String>,
    /// Avatar image (jpeg/png/gif/webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub avatar: Option<String>,
}

/// Request DTO for changing the admin password
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_pass_validation() {
        assert!(ProfileFormData::default().validate().is_ok());
    }

    #[test]
    fn present_but_empty_name_is_rejected() {
        let form = ProfileFormData {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn bad_email_is_rejected() {
        let form = ProfileFormData {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn valid_fields_pass() {
        let form = ProfileFormData {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            bio: Some("House-plan curator".to_string()),
            phone: Some("+46 70 123 45 67".to_string()),
        };
        assert!(form.validate().is_ok());
    }
}
