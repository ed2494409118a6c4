use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::leaderboard::handlers;
use crate::features::leaderboard::services::LeaderboardService;

/// Public leaderboard route
pub fn routes(service: Arc<LeaderboardService>) -> Router {
    Router::new()
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .with_state(service)
}
