use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Protected auth routes (require JWT authentication)
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_me_requires_authentication() {
        let server = TestServer::new(protected_routes()).unwrap();
        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_roles() {
        let admin = create_admin_user();
        let server = TestServer::new(with_user(protected_routes(), admin.clone())).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["user_id"], admin.user_id.to_string());
        assert_eq!(body["data"]["is_admin"], true);
        assert_eq!(body["data"]["roles"][0], "admin");
    }
}
