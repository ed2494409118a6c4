use crate::features::profiles::handlers::profile_handler;
use crate::features::profiles::services::ProfileService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(profile_handler::get_profile).patch(profile_handler::update_profile),
        )
        .with_state(service)
}
