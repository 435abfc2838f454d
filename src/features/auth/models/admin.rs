use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a back-office operator account
#[derive(Debug, Clone, FromRow)]
pub struct AdminAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
