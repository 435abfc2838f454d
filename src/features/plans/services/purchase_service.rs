use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::plans::dtos::{
    PurchaseReceiptDto, PurchaseRequestResponseDto, SubmitPurchaseDto,
};
use crate::shared::types::PaginationQuery;

/// Service for recording purchase intents and listing them for review
pub struct PurchaseService {
    pool: PgPool,
}

impl PurchaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a purchase intent for a paid plan.
    ///
    /// Free plans are rejected; there is nothing to purchase. The request
    /// is stored as pending; payment settlement happens offline.
    pub async fn submit(&self, dto: SubmitPurchaseDto) -> Result<PurchaseReceiptDto> {
        let is_free =
            sqlx::query_scalar::<_, bool>("SELECT is_free FROM house_plans WHERE id = $1")
                .bind(dto.plan_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?
                .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

        if is_free {
            return Err(AppError::Validation(
                "This plan is free and does not require a purchase".to_string(),
            ));
        }

        let (receipt_id, status) = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            INSERT INTO purchase_requests
                (plan_id, customer_name, customer_email, customer_phone,
                 customer_address, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, status
            "#,
        )
        .bind(dto.plan_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(&dto.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record purchase request: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "Purchase request {} recorded for plan {}",
            receipt_id, dto.plan_id
        );
        Ok(PurchaseReceiptDto { receipt_id, status })
    }

    /// List purchase requests for review, newest first, with the plan name
    /// joined in. Returns (requests, total_count).
    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<PurchaseRequestResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM purchase_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let rows = sqlx::query_as::<_, PurchaseRequestResponseDto>(
            r#"
            SELECT pr.id, pr.plan_id, hp.name AS plan_name, pr.customer_name,
                   pr.customer_email, pr.customer_phone, pr.customer_address,
                   pr.message, pr.status, pr.created_at
            FROM purchase_requests pr
            JOIN house_plans hp ON hp.id = pr.plan_id
            ORDER BY pr.created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(pagination.offset())
        .bind(pagination.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list purchase requests: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows, total))
    }
}
