use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Admin identity attached to a request after the middleware has verified
/// the bearer token and re-fetched the account from the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedAdmin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}
