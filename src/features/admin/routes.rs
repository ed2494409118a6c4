use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin routes, nested under `/api/admin` by the caller
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{id}", patch(handlers::update_report))
        .route("/contact-messages", get(handlers::list_contact_messages))
        .with_state(admin_service)
}
