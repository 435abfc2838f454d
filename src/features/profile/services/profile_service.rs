use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::AdminAccount;
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::profile::dtos::{ChangePasswordDto, ProfileFormData, ProfileResponseDto};
use crate::modules::storage::{generate_key, AssetKind, ContentStore};
use crate::shared::types::UploadedFile;

const ADMIN_COLUMNS: &str =
    "id, email, password_hash, name, bio, phone, avatar_url, created_at, updated_at";

/// Service for the authenticated admin's own account record
pub struct ProfileService {
    pool: PgPool,
    store: Arc<dyn ContentStore>,
}

impl ProfileService {
    pub fn new(pool: PgPool, store: Arc<dyn ContentStore>) -> Self {
        Self { pool, store }
    }

    pub async fn get(&self, admin_id: Uuid) -> Result<ProfileResponseDto> {
        let admin = self.find(admin_id).await?;
        Ok(admin.into())
    }

    /// Apply the provided fields; absent fields keep their stored value.
    ///
    /// An email change is checked against other accounts first. A new
    /// avatar is written before the row update and the replaced one is
    /// removed best-effort afterwards.
    pub async fn update(
        &self,
        admin_id: Uuid,
        form: ProfileFormData,
        avatar: Option<UploadedFile>,
    ) -> Result<ProfileResponseDto> {
        form.validate()?;
        let existing = self.find(admin_id).await?;

        if let Some(email) = &form.email {
            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM admins WHERE email = $1 AND id <> $2",
            )
            .bind(email)
            .bind(admin_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

            if taken > 0 {
                return Err(AppError::Conflict(
                    "Email is already in use by another account".to_string(),
                ));
            }
        }

        let new_avatar_url = match avatar {
            Some(file) => {
                let key = generate_key(AssetKind::Avatar, &file.original_filename);
                self.store.put(&key, &file.data).await?;
                Some(self.store.public_url(&key))
            }
            None => None,
        };

        let updated = sqlx::query_as::<_, AdminAccount>(&format!(
            r#"
            UPDATE admins SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                bio = COALESCE($3, bio),
                phone = COALESCE($4, phone),
                avatar_url = COALESCE($5, avatar_url),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(&form.name)
        .bind(&form.email)
        .bind(&form.bio)
        .bind(&form.phone)
        .bind(&new_avatar_url)
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await;

        let admin = match updated {
            Ok(admin) => admin,
            Err(e) => {
                tracing::error!("Failed to update profile {}: {:?}", admin_id, e);
                if let Some(url) = &new_avatar_url {
                    self.cleanup_url(url).await;
                }
                return Err(map_update_error(e));
            }
        };

        if new_avatar_url.is_some() {
            if let Some(old) = &existing.avatar_url {
                self.cleanup_url(old).await;
            }
        }

        info!("Profile updated for admin {}", admin_id);
        Ok(admin.into())
    }

    /// Verify the current password, then store a fresh hash of the new one
    pub async fn change_password(&self, admin_id: Uuid, dto: ChangePasswordDto) -> Result<()> {
        let admin = self.find(admin_id).await?;

        if !verify_password(&dto.current_password, &admin.password_hash)? {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE admins SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(admin_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        info!("Password changed for admin {}", admin_id);
        Ok(())
    }

    async fn find(&self, admin_id: Uuid) -> Result<AdminAccount> {
        let admin = sqlx::query_as::<_, AdminAccount>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        admin.ok_or_else(|| AppError::NotFound("Admin account not found".to_string()))
    }

    async fn cleanup_url(&self, url: &str) {
        let Some(key) = self.store.key_from_url(url) else {
            return;
        };
        if let Err(e) = self.store.delete(&key).await {
            warn!("Failed to delete stored asset {}: {}", key, e);
        }
    }
}

/// The email precheck races with concurrent updates; when the unique index
/// on `admins.email` wins that race, report a conflict rather than a
/// server error.
fn map_update_error(err: sqlx::Error) -> AppError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            AppError::Conflict("Email is already in use by another account".to_string())
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[derive(Debug)]
    struct DuplicateEmail;

    impl std::fmt::Display for DuplicateEmail {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"admins_email_key\"")
        }
    }

    impl StdError for DuplicateEmail {}

    impl sqlx::error::DatabaseError for DuplicateEmail {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"admins_email_key\""
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn concurrent_email_grab_reports_conflict() {
        let err = map_update_error(sqlx::Error::Database(Box::new(DuplicateEmail)));
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn other_update_failures_stay_database_errors() {
        let err = map_update_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }
}
