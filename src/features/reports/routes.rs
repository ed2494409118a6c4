use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;
use crate::shared::constants::{MAX_IMAGE_SIZE, MAX_REPORT_IMAGES};

/// Upload ceiling: every image at full size plus room for the text fields
const SUBMISSION_BODY_LIMIT: usize = MAX_REPORT_IMAGES * MAX_IMAGE_SIZE + 1024 * 1024;

/// Routes that require the auth middleware to be applied by the caller
pub fn protected_routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route(
            "/api/reports",
            post(handlers::submit_report).layer(DefaultBodyLimit::max(SUBMISSION_BODY_LIMIT)),
        )
        .route("/api/reports/mine", get(handlers::list_my_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route("/api/geocode/reverse", get(handlers::reverse_geocode))
        .with_state(state)
}

/// Public tracking lookup
pub fn public_routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route(
            "/api/reports/track/{tracking_number}",
            get(handlers::track_report),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeocodingConfig;
    use crate::core::error::AppError;
    use crate::features::reports::services::GeocodingService;
    use crate::modules::storage::ObjectStore;
    use crate::shared::test_helpers::{create_citizen_user, lazy_pool, with_user};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use std::time::Duration;

    struct UnreachableStore;

    #[async_trait]
    impl ObjectStore for UnreachableStore {
        async fn put_public(&self, _: &str, _: Vec<u8>, _: &str) -> Result<String, AppError> {
            Err(AppError::Internal("store not available in tests".to_string()))
        }
    }

    fn report_service() -> Arc<ReportService> {
        let geocoding = GeocodingService::new(&GeocodingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            user_agent: "civic-engage-tests".to_string(),
            timeout: Duration::from_millis(100),
        })
        .unwrap();
        Arc::new(ReportService::new(
            lazy_pool(),
            Arc::new(UnreachableStore),
            Arc::new(geocoding),
        ))
    }

    fn png(name: &str) -> Part {
        Part::bytes(vec![0x89, b'P', b'N', b'G'])
            .file_name(name)
            .mime_type("image/png")
    }

    fn base_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("category", "pothole")
            .add_text("title", "Pothole on the main road")
            .add_text("description", "Deep enough to damage tyres")
    }

    #[tokio::test]
    async fn test_malformed_tracking_number_is_not_found() {
        let server = TestServer::new(public_routes(report_service())).unwrap();

        let response = server.get("/api/reports/track/not-a-number").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Report not found");
    }

    #[tokio::test]
    async fn test_submit_requires_authentication() {
        let server = TestServer::new(protected_routes(report_service())).unwrap();

        let response = server.post("/api/reports").multipart(base_form()).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_rejects_more_than_five_images() {
        let router = with_user(protected_routes(report_service()), create_citizen_user());
        let server = TestServer::new(router).unwrap();

        let mut form = base_form();
        for i in 0..6 {
            form = form.add_part("images", png(&format!("photo-{}.png", i)));
        }

        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_rejects_non_image_part() {
        let router = with_user(protected_routes(report_service()), create_citizen_user());
        let server = TestServer::new(router).unwrap();

        let form = base_form().add_part(
            "images",
            Part::bytes(b"%PDF-1.7".to_vec())
                .file_name("scan.pdf")
                .mime_type("application/pdf"),
        );

        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_category_and_lone_coordinate() {
        let router = with_user(protected_routes(report_service()), create_citizen_user());
        let server = TestServer::new(router).unwrap();

        let unknown = MultipartForm::new()
            .add_text("category", "volcano")
            .add_text("title", "Smoke")
            .add_text("description", "Lots of it");
        server
            .post("/api/reports")
            .multipart(unknown)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let lone = base_form().add_text("latitude", "-6.2");
        server
            .post("/api/reports")
            .multipart(lone)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reverse_geocode_rejects_out_of_range() {
        let router = with_user(protected_routes(report_service()), create_citizen_user());
        let server = TestServer::new(router).unwrap();

        let response = server
            .get("/api/geocode/reverse")
            .add_query_param("lat", 95.0)
            .add_query_param("lon", 10.0)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reverse_geocode_degrades_to_null() {
        let router = with_user(protected_routes(report_service()), create_citizen_user());
        let server = TestServer::new(router).unwrap();

        let response = server
            .get("/api/geocode/reverse")
            .add_query_param("lat", -6.2)
            .add_query_param("lon", 106.8)
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(body["data"].is_null());
    }
}
