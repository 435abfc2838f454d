use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Routes reachable without a token
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

/// Routes behind the auth middleware
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(handlers::me))
}
