use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AdminSummaryDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::auth::models::AdminAccount;
use crate::features::auth::services::password;
use crate::features::auth::services::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for admin login and bearer-token verification
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Exchange email/password for a signed bearer token.
    ///
    /// Unknown email and wrong password produce the same error shape.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let account = sqlx::query_as::<_, AdminAccount>(
            r#"
            SELECT id, email, password_hash, name, bio, phone, avatar_url, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up admin account: {:?}", e);
            AppError::Database(e)
        })?;

        let account = account
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !password::verify_password(&dto.password, &account.password_hash)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.token_service.sign(account.id)?;

        tracing::info!("Admin logged in: id={}", account.id);

        Ok(LoginResponseDto {
            token,
            expires_in: self.token_service.token_ttl_secs(),
            admin: AdminSummaryDto::from(account),
        })
    }

    /// Verify a bearer token and re-resolve the admin from the store.
    ///
    /// Claims embedded in the token are never trusted for authorization;
    /// a deleted account is rejected here even if its token is still valid.
    pub async fn verify_bearer(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let claims = self.token_service.verify(token)?;

        let account = self
            .find_account(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        Ok(AuthenticatedAdmin {
            id: account.id,
            email: account.email,
            name: account.name,
        })
    }

    async fn find_account(&self, id: Uuid) -> Result<Option<AdminAccount>> {
        sqlx::query_as::<_, AdminAccount>(
            r#"
            SELECT id, email, password_hash, name, bio, phone, avatar_url, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve admin account: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Create the first admin account from env credentials if the table is
    /// empty. Replaces the original deployment's ad-hoc setup script.
    pub async fn ensure_bootstrap_admin(&self, email: &str, plain_password: &str) -> Result<()> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            return Ok(());
        }

        let password_hash = password::hash_password(plain_password)?;

        sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash, name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .bind("Administrator")
        .execute(&self.pool)
        .await?;

        tracing::info!("Bootstrap admin account created: {}", email);
        Ok(())
    }
}
