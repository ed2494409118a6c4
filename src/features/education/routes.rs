use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::education::handlers;
use crate::features::education::services::QuizService;

/// Public quiz catalog
pub fn public_routes(service: Arc<QuizService>) -> Router {
    Router::new()
        .route("/api/quiz/categories", get(handlers::list_categories))
        .route(
            "/api/quiz/categories/{id}/questions",
            get(handlers::list_questions),
        )
        .with_state(service)
}

/// Routes that require the auth middleware to be applied by the caller
pub fn protected_routes(service: Arc<QuizService>) -> Router {
    Router::new()
        .route(
            "/api/quiz/questions/{id}/answer",
            post(handlers::submit_answer),
        )
        .route("/api/quiz/progress", get(handlers::get_progress))
        .with_state(service)
}
