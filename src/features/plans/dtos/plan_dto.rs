use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::plans::models::Plan;
use crate::shared::constants::DEFAULT_PAGE_SIZE;

/// Free/paid restriction for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanFilter {
    Free,
    Paid,
}

impl PlanFilter {
    /// The `is_free` value this filter selects
    pub fn is_free(&self) -> bool {
        matches!(self, PlanFilter::Free)
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query parameters for the public catalog listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListPlansQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page (default 12, max 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Case-insensitive substring match on name/description
    pub search: Option<String>,

    /// Restrict to free or paid plans
    pub filter: Option<PlanFilter>,
}

impl ListPlansQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, crate::shared::constants::MAX_PAGE_SIZE)
    }
}

/// Response DTO for a plan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length: Decimal,
    pub width: Decimal,
    pub area: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub floors: i32,
    pub price: Decimal,
    pub is_free: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Plan> for PlanResponseDto {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            length: plan.length,
            width: plan.width,
            area: plan.area,
            bedrooms: plan.bedrooms,
            bathrooms: plan.bathrooms,
            floors: plan.floors,
            price: plan.price,
            is_free: plan.is_free,
            image_url: plan.image_url,
            file_url: plan.file_url,
            download_count: plan.download_count,
            created_at: plan.created_at,
        }
    }
}

/// Validated, invariant-normalized field set for create/update
#[derive(Debug, Clone, PartialEq)]
pub struct PlanUpsertDto {
    pub name: String,
    pub description: String,
    pub length: Decimal,
    pub width: Decimal,
    pub area: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub floors: i32,
    pub price: Decimal,
    pub is_free: bool,
}

/// Raw text fields collected from the multipart form, before validation.
///
/// `finish()` applies the required-field checks and the free/price
/// invariant; no mutation happens until it has succeeded.
#[derive(Debug, Default)]
pub struct PlanFormData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub area: Option<Decimal>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub floors: Option<i32>,
    pub price: Option<Decimal>,
    pub is_free: Option<bool>,
}

impl PlanFormData {
    pub fn finish(self) -> Result<PlanUpsertDto> {
        let name = required_text("name", self.name)?;
        let description = required_text("description", self.description)?;

        let length = required_non_negative("length", self.length)?;
        let width = required_non_negative("width", self.width)?;
        let area = required_non_negative("area", self.area)?;

        let bedrooms = required_count("bedrooms", self.bedrooms)?;
        let bathrooms = required_count("bathrooms", self.bathrooms)?;
        let floors = required_count("floors", self.floors)?;

        let is_free = self.is_free.unwrap_or(false);

        // Free/price invariant: free forces price 0; a paid plan must come
        // with an explicit positive price, never a silent default
        let price = if is_free {
            Decimal::ZERO
        } else {
            match self.price {
                Some(p) if p > Decimal::ZERO => p,
                Some(_) => {
                    return Err(AppError::Validation(
                        "A paid plan must have a positive price".to_string(),
                    ))
                }
                None => {
                    return Err(AppError::Validation(
                        "Price is required for a paid plan".to_string(),
                    ))
                }
            }
        };

        Ok(PlanUpsertDto {
            name,
            description,
            length,
            width,
            area,
            bedrooms,
            bathrooms,
            floors,
            price,
            is_free,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn required_non_negative(field: &str, value: Option<Decimal>) -> Result<Decimal> {
    match value {
        Some(v) if v >= Decimal::ZERO => Ok(v),
        Some(_) => Err(AppError::Validation(format!(
            "{} must be a non-negative number",
            field
        ))),
        None => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn required_count(field: &str, value: Option<i32>) -> Result<i32> {
    match value {
        Some(v) if v >= 0 => Ok(v),
        Some(_) => Err(AppError::Validation(format!(
            "{} must be a non-negative integer",
            field
        ))),
        None => Err(AppError::Validation(format!("{} is required", field))),
    }
}

/// OpenAPI schema describing the multipart form for plan create/update.
/// The actual handlers use axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PlanMultipartDto {
    #[schema(example = "Modern Family Villa")]
    pub name: String,
    pub description: String,
    #[schema(example = "12.5")]
    pub length: String,
    #[schema(example = "10.0")]
    pub width: String,
    #[schema(example = "125.0")]
    pub area: String,
    #[schema(example = "3")]
    pub bedrooms: String,
    #[schema(example = "2")]
    pub bathrooms: String,
    #[schema(example = "1")]
    pub floors: String,
    #[schema(example = "149.99")]
    pub price: Option<String>,
    #[schema(example = "false")]
    pub is_free: Option<String>,
    /// Preview image (jpeg/png/gif/webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
    /// Plan document (pdf/zip/rar)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
}

/// Response DTO for a successful download-gate resolution
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponseDto {
    /// Reference to the stored plan document
    pub file_url: String,
    /// Whether this plan is paid and therefore gated behind purchase intake
    pub requires_purchase: bool,
}

/// Response DTO for plan deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletePlanResponseDto {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> PlanFormData {
        PlanFormData {
            name: Some("Cozy Cottage".to_string()),
            description: Some("Charming 2-bedroom cottage".to_string()),
            length: Some(Decimal::new(18, 0)),
            width: Some(Decimal::new(12, 0)),
            area: Some(Decimal::new(216, 0)),
            bedrooms: Some(2),
            bathrooms: Some(1),
            floors: Some(1),
            price: None,
            is_free: Some(true),
        }
    }

    #[test]
    fn free_plan_price_is_forced_to_zero() {
        let mut form = base_form();
        form.price = Some(Decimal::new(4999, 2));
        let dto = form.finish().unwrap();
        assert!(dto.is_free);
        assert_eq!(dto.price, Decimal::ZERO);
    }

    #[test]
    fn paid_plan_without_price_is_rejected() {
        let mut form = base_form();
        form.is_free = Some(false);
        form.price = None;
        assert!(matches!(form.finish(), Err(AppError::Validation(_))));
    }

    #[test]
    fn paid_plan_with_zero_price_is_rejected() {
        let mut form = base_form();
        form.is_free = Some(false);
        form.price = Some(Decimal::ZERO);
        assert!(matches!(form.finish(), Err(AppError::Validation(_))));
    }

    #[test]
    fn paid_plan_with_positive_price_passes() {
        let mut form = base_form();
        form.is_free = Some(false);
        form.price = Some(Decimal::new(4999, 2));
        let dto = form.finish().unwrap();
        assert!(!dto.is_free);
        assert_eq!(dto.price, Decimal::new(4999, 2));
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut form = base_form();
        form.name = Some("   ".to_string());
        assert!(matches!(form.finish(), Err(AppError::Validation(_))));
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let mut form = base_form();
        form.width = Some(Decimal::new(-5, 0));
        assert!(matches!(form.finish(), Err(AppError::Validation(_))));

        let mut form = base_form();
        form.bedrooms = Some(-1);
        assert!(matches!(form.finish(), Err(AppError::Validation(_))));
    }

    #[test]
    fn unspecified_is_free_defaults_to_paid() {
        let mut form = base_form();
        form.is_free = None;
        form.price = Some(Decimal::new(2999, 2));
        let dto = form.finish().unwrap();
        assert!(!dto.is_free);
    }

    #[test]
    fn query_offset_is_zero_based() {
        let q = ListPlansQuery {
            page: 3,
            page_size: 12,
            search: None,
            filter: None,
        };
        assert_eq!(q.offset(), 24);
        assert_eq!(q.limit(), 12);
    }

    #[test]
    fn query_clamps_page_and_page_size() {
        let q = ListPlansQuery {
            page: -2,
            page_size: 10_000,
            search: None,
            filter: None,
        };
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), crate::shared::constants::MAX_PAGE_SIZE);
    }
}
