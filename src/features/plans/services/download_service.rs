use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::plans::dtos::DownloadResponseDto;

/// Service enforcing the paid-download gate and recording downloads
pub struct DownloadService {
    pool: PgPool,
}

impl DownloadService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a download request for a plan.
    ///
    /// Free plans always pass. Paid plans require at least one purchase
    /// request on record for the plan; otherwise the caller gets a
    /// payment-required response and nothing is recorded. On success the
    /// download row and the counter increment commit in one transaction.
    pub async fn request_download(&self, plan_id: Uuid) -> Result<DownloadResponseDto> {
        let (is_free, file_url) = sqlx::query_as::<_, (bool, Option<String>)>(
            "SELECT is_free, file_url FROM house_plans WHERE id = $1",
        )
        .bind(plan_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch plan {} for download: {:?}", plan_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

        let purchases = if is_free {
            0
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM purchase_requests WHERE plan_id = $1",
            )
            .bind(plan_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?
        };

        let response = resolve_access(is_free, file_url, purchases)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("INSERT INTO downloads (plan_id) VALUES ($1)")
            .bind(plan_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("UPDATE house_plans SET download_count = download_count + 1 WHERE id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        info!("Download recorded for plan {}", plan_id);
        Ok(response)
    }
}

/// Decide whether a download may proceed.
///
/// A plan with no stored document is not downloadable at all. Free plans
/// pass unconditionally; paid plans need at least one purchase request on
/// record.
fn resolve_access(
    is_free: bool,
    file_url: Option<String>,
    purchases: i64,
) -> Result<DownloadResponseDto> {
    let file_url =
        file_url.ok_or_else(|| AppError::NotFound("Plan has no downloadable file".to_string()))?;

    if !is_free && purchases == 0 {
        return Err(AppError::PaymentRequired(
            "Purchase required before downloading this plan".to_string(),
        ));
    }

    Ok(DownloadResponseDto {
        file_url,
        requires_purchase: !is_free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_url() -> Option<String> {
        Some("/uploads/documents/plan.pdf".to_string())
    }

    #[test]
    fn free_plan_downloads_without_any_purchase() {
        let response = resolve_access(true, stored_url(), 0).unwrap();
        assert_eq!(response.file_url, "/uploads/documents/plan.pdf");
        assert!(!response.requires_purchase);
    }

    #[test]
    fn paid_plan_without_purchase_is_payment_required() {
        let err = resolve_access(false, stored_url(), 0).unwrap_err();
        assert!(matches!(err, AppError::PaymentRequired(_)));
    }

    #[test]
    fn paid_plan_with_purchase_on_record_passes() {
        let response = resolve_access(false, stored_url(), 1).unwrap();
        assert_eq!(response.file_url, "/uploads/documents/plan.pdf");
        assert!(response.requires_purchase);
    }

    #[test]
    fn plan_without_stored_document_is_not_found() {
        let err = resolve_access(true, None, 0).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
