use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get_or_create(user.user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(ProfileResponseDto::new(profile, &user)),
        None,
        None,
    )))
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error or empty update"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    if dto.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let profile = service.update(user.user_id, &dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ProfileResponseDto::new(profile, &user)),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}
