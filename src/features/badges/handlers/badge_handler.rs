use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::badges::dtos::{BadgeResponseDto, EarnedBadgeResponseDto};
use crate::features::badges::services::BadgeService;
use crate::shared::types::ApiResponse;

/// List all badges that can be earned
#[utoipa::path(
    get,
    path = "/api/badges",
    tag = "badges",
    responses(
        (status = 200, description = "Badge catalog", body = ApiResponse<Vec<BadgeResponseDto>>)
    )
)]
pub async fn list_badges(
    State(service): State<Arc<BadgeService>>,
) -> Result<Json<ApiResponse<Vec<BadgeResponseDto>>>> {
    let badges = service.list_catalog().await?;
    Ok(Json(ApiResponse::success(Some(badges), None, None)))
}

/// List badges earned by the authenticated user
#[utoipa::path(
    get,
    path = "/api/badges/mine",
    tag = "badges",
    responses(
        (status = 200, description = "Earned badges, newest first", body = ApiResponse<Vec<EarnedBadgeResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_badges(
    user: AuthenticatedUser,
    State(service): State<Arc<BadgeService>>,
) -> Result<Json<ApiResponse<Vec<EarnedBadgeResponseDto>>>> {
    let badges = service.list_earned(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(badges), None, None)))
}
