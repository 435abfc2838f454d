use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::plans::dtos::{ListPlansQuery, PlanResponseDto, PlanUpsertDto};
use crate::features::plans::models::Plan;
use crate::modules::storage::{generate_key, AssetKind, ContentStore};
use crate::shared::types::UploadedFile;

const PLAN_COLUMNS: &str = "id, name, description, length, width, area, bedrooms, bathrooms, \
     floors, price, is_free, image_url, file_url, download_count, created_at, updated_at";

/// Service for catalog reads and admin CRUD on house plans
pub struct PlanService {
    pool: PgPool,
    store: Arc<dyn ContentStore>,
}

impl PlanService {
    pub fn new(pool: PgPool, store: Arc<dyn ContentStore>) -> Self {
        Self { pool, store }
    }

    /// List plans with optional search term and free/paid filter.
    /// Returns (plans, total_count); an empty page is not an error.
    pub async fn list(&self, query: &ListPlansQuery) -> Result<(Vec<PlanResponseDto>, i64)> {
        let search = escape_like(query.search.as_deref().unwrap_or("").trim());
        let is_free = query.filter.map(|f| f.is_free());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM house_plans
            WHERE ($1 = '' OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
              AND ($2::boolean IS NULL OR is_free = $2)
            "#,
        )
        .bind(&search)
        .bind(is_free)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count plans: {:?}", e);
            AppError::Database(e)
        })?;

        let plans = sqlx::query_as::<_, Plan>(&format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM house_plans
            WHERE ($1 = '' OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
              AND ($2::boolean IS NULL OR is_free = $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#
        ))
        .bind(&search)
        .bind(is_free)
        .bind(query.offset())
        .bind(query.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list plans: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((plans.into_iter().map(|p| p.into()).collect(), total))
    }

    /// Get a single plan by id
    pub async fn get(&self, id: Uuid) -> Result<PlanResponseDto> {
        self.find(id).await.map(|plan| plan.into())
    }

    /// Create a plan with optional image/document uploads.
    ///
    /// Files are written first; if the row insert fails, the just-written
    /// files are removed so no orphans accumulate.
    pub async fn create(
        &self,
        dto: PlanUpsertDto,
        image: Option<UploadedFile>,
        document: Option<UploadedFile>,
    ) -> Result<PlanResponseDto> {
        let image_url = self.store_asset(AssetKind::Image, image.as_ref()).await?;
        let file_url = match self
            .store_asset(AssetKind::Document, document.as_ref())
            .await
        {
            Ok(url) => url,
            Err(e) => {
                self.cleanup_urls([image_url.as_deref()]).await;
                return Err(e);
            }
        };

        let inserted = sqlx::query_as::<_, Plan>(&format!(
            r#"
            INSERT INTO house_plans
                (name, description, length, width, area, bedrooms, bathrooms, floors,
                 price, is_free, image_url, file_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.length)
        .bind(dto.width)
        .bind(dto.area)
        .bind(dto.bedrooms)
        .bind(dto.bathrooms)
        .bind(dto.floors)
        .bind(dto.price)
        .bind(dto.is_free)
        .bind(&image_url)
        .bind(&file_url)
        .fetch_one(&self.pool)
        .await;

        let plan = match inserted {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!("Failed to insert plan: {:?}", e);
                self.cleanup_urls([image_url.as_deref(), file_url.as_deref()])
                    .await;
                return Err(AppError::Database(e));
            }
        };

        info!("Plan created: id={}, name={}", plan.id, plan.name);
        Ok(plan.into())
    }

    /// Full-field update; partial updates are not supported.
    ///
    /// Replacement files are written and the row updated before the old
    /// files are deleted, so a mid-way failure never leaves the row
    /// pointing at a missing file.
    pub async fn update(
        &self,
        id: Uuid,
        dto: PlanUpsertDto,
        image: Option<UploadedFile>,
        document: Option<UploadedFile>,
    ) -> Result<PlanResponseDto> {
        let existing = self.find(id).await?;

        let new_image_url = self.store_asset(AssetKind::Image, image.as_ref()).await?;
        let new_file_url = match self
            .store_asset(AssetKind::Document, document.as_ref())
            .await
        {
            Ok(url) => url,
            Err(e) => {
                self.cleanup_urls([new_image_url.as_deref()]).await;
                return Err(e);
            }
        };

        let image_url = new_image_url.clone().or(existing.image_url.clone());
        let file_url = new_file_url.clone().or(existing.file_url.clone());

        let updated = sqlx::query_as::<_, Plan>(&format!(
            r#"
            UPDATE house_plans SET
                name = $1, description = $2, length = $3, width = $4, area = $5,
                bedrooms = $6, bathrooms = $7, floors = $8, price = $9, is_free = $10,
                image_url = $11, file_url = $12, updated_at = NOW()
            WHERE id = $13
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.length)
        .bind(dto.width)
        .bind(dto.area)
        .bind(dto.bedrooms)
        .bind(dto.bathrooms)
        .bind(dto.floors)
        .bind(dto.price)
        .bind(dto.is_free)
        .bind(&image_url)
        .bind(&file_url)
        .bind(id)
        .fetch_one(&self.pool)
        .await;

        let plan = match updated {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!("Failed to update plan {}: {:?}", id, e);
                self.cleanup_urls([new_image_url.as_deref(), new_file_url.as_deref()])
                    .await;
                return Err(AppError::Database(e));
            }
        };

        // Row now references the new files; the replaced ones can go
        if new_image_url.is_some() {
            self.cleanup_urls([existing.image_url.as_deref()]).await;
        }
        if new_file_url.is_some() {
            self.cleanup_urls([existing.file_url.as_deref()]).await;
        }

        info!("Plan updated: id={}", plan.id);
        Ok(plan.into())
    }

    /// Delete a plan; its download rows cascade at the database layer and
    /// its stored files are removed best-effort afterwards.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing = self.find(id).await?;

        sqlx::query("DELETE FROM house_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete plan {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        self.cleanup_urls([existing.image_url.as_deref(), existing.file_url.as_deref()])
            .await;

        info!("Plan deleted: id={}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Plan> {
        let plan = sqlx::query_as::<_, Plan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM house_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch plan {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        plan.ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
    }

    /// Store one uploaded asset and return its public URL
    async fn store_asset(
        &self,
        kind: AssetKind,
        file: Option<&UploadedFile>,
    ) -> Result<Option<String>> {
        let Some(file) = file else {
            return Ok(None);
        };

        let key = generate_key(kind, &file.original_filename);
        self.store.put(&key, &file.data).await?;
        Ok(Some(self.store.public_url(&key)))
    }

    /// Best-effort removal of stored assets by their public URLs
    async fn cleanup_urls<'a, I>(&self, urls: I)
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        for url in urls.into_iter().flatten() {
            let Some(key) = self.store.key_from_url(url) else {
                continue;
            };
            if let Err(e) = self.store.delete(&key).await {
                warn!("Failed to delete stored asset {}: {}", key, e);
            }
        }
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
/// Postgres treats backslash as the default LIKE escape character.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_wildcards_match_literally() {
        assert_eq!(escape_like("100% custom"), "100\\% custom");
        assert_eq!(escape_like("loft_plan"), "loft\\_plan");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_like(""), "");
        assert_eq!(escape_like("cottage"), "cottage");
    }
}
