#[cfg(test)]
use crate::features::auth::model::AuthenticatedAdmin;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_test_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        id: Uuid::new_v4(),
        email: "admin@estateplans.test".to_string(),
        name: "Test Admin".to_string(),
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_admin());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
