use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::badges::handlers;
use crate::features::badges::services::BadgeService;

/// Public badge catalog
pub fn public_routes(service: Arc<BadgeService>) -> Router {
    Router::new()
        .route("/api/badges", get(handlers::list_badges))
        .with_state(service)
}

/// Routes that require the auth middleware to be applied by the caller
pub fn protected_routes(service: Arc<BadgeService>) -> Router {
    Router::new()
        .route("/api/badges/mine", get(handlers::list_my_badges))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_my_badges_requires_authentication() {
        let service = Arc::new(BadgeService::new(lazy_pool()));
        let server = TestServer::new(protected_routes(service)).unwrap();

        server
            .get("/api/badges/mine")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
