use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::education::dtos::{
    AnswerResultDto, CategoryProgressDto, QuizCategoryResponseDto, QuizQuestionDto,
    SubmitAnswerDto,
};
use crate::features::education::services::QuizService;
use crate::shared::types::ApiResponse;

/// List quiz categories
#[utoipa::path(
    get,
    path = "/api/quiz/categories",
    responses(
        (status = 200, description = "Quiz categories", body = ApiResponse<Vec<QuizCategoryResponseDto>>)
    ),
    tag = "education"
)]
pub async fn list_categories(
    State(service): State<Arc<QuizService>>,
) -> Result<Json<ApiResponse<Vec<QuizCategoryResponseDto>>>> {
    let categories = service.list_categories().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// List the questions of a category (answers withheld)
#[utoipa::path(
    get,
    path = "/api/quiz/categories/{id}/questions",
    params(
        ("id" = Uuid, Path, description = "Quiz category ID")
    ),
    responses(
        (status = 200, description = "Questions", body = ApiResponse<Vec<QuizQuestionDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "education"
)]
pub async fn list_questions(
    State(service): State<Arc<QuizService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<QuizQuestionDto>>>> {
    let questions = service.list_questions(id).await?;
    Ok(Json(ApiResponse::success(Some(questions), None, None)))
}

/// Answer a question
#[utoipa::path(
    post,
    path = "/api/quiz/questions/{id}/answer",
    params(
        ("id" = Uuid, Path, description = "Quiz question ID")
    ),
    request_body = SubmitAnswerDto,
    responses(
        (status = 200, description = "Answer scored", body = ApiResponse<AnswerResultDto>),
        (status = 400, description = "Selected option out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Quiz not found")
    ),
    security(("bearer_auth" = [])),
    tag = "education"
)]
pub async fn submit_answer(
    user: AuthenticatedUser,
    State(service): State<Arc<QuizService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SubmitAnswerDto>,
) -> Result<Json<ApiResponse<AnswerResultDto>>> {
    let result = service
        .answer(user.user_id, id, dto.selected_index)
        .await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Quiz progress of the authenticated user, per category
#[utoipa::path(
    get,
    path = "/api/quiz/progress",
    responses(
        (status = 200, description = "Progress per category", body = ApiResponse<Vec<CategoryProgressDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "education"
)]
pub async fn get_progress(
    user: AuthenticatedUser,
    State(service): State<Arc<QuizService>>,
) -> Result<Json<ApiResponse<Vec<CategoryProgressDto>>>> {
    let progress = service.progress(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(progress), None, None)))
}
