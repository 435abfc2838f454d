use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// JWT claims for an admin bearer token.
///
/// Only the account id is embedded; everything authorization-relevant is
/// re-fetched from the store on each request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account id
    pub sub: Uuid,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Service for signing and verifying admin bearer tokens (HS256)
pub struct TokenService {
    secret: String,
    token_ttl_secs: u64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            token_ttl_secs: config.token_ttl.as_secs(),
            leeway_secs: config.jwt_leeway.as_secs(),
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Sign a new token for the given admin account.
    pub fn sign(&self, admin_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: admin_id,
            iat: now,
            exp: now + self.token_ttl_secs as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing error: {}", e)))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = self.leeway_secs;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(ttl_secs: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-key".to_string(),
            token_ttl: Duration::from_secs(ttl_secs),
            jwt_leeway: Duration::from_secs(0),
            bootstrap_email: None,
            bootstrap_password: None,
        }
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let service = TokenService::new(&test_config(3600));
        let admin_id = Uuid::new_v4();

        let token = service.sign(admin_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, admin_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config(3600);
        let service = TokenService::new(&config);

        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = TokenService::new(&test_config(3600));
        let mut other_config = test_config(3600);
        other_config.jwt_secret = "a-completely-different-secret".to_string();
        let other = TokenService::new(&other_config);

        let token = other.sign(Uuid::new_v4()).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(&test_config(3600));
        assert!(service.verify("not.a.jwt").is_err());
    }
}
