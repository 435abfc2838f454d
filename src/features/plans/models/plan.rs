use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a house plan.
///
/// Invariant (also enforced by a CHECK constraint): a free plan has price 0,
/// a paid plan has a positive price.
#[derive(Debug, Clone, FromRow)]
pub struct Plan {
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
    pub image_url: Option<String>,
    pub file_url: Option<String>,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
