use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::profile::handlers;
use crate::features::profile::services::ProfileService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Bearer-gated profile routes
pub fn routes(profile_service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile).layer(
                // Avatar upload plus multipart framing overhead
                DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024),
            ),
        )
        .route(
            "/api/profile/change-password",
            put(handlers::change_password),
        )
        .with_state(profile_service)
}
