use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::leaderboard::dtos::LeaderboardEntryDto;
use crate::features::leaderboard::services::LeaderboardService;
use crate::shared::types::{ApiResponse, Meta};

/// Top 50 citizens by points
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Ranked citizens", body = ApiResponse<Vec<LeaderboardEntryDto>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_leaderboard(
    State(service): State<Arc<LeaderboardService>>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>> {
    let entries = service.top().await?;
    let total = entries.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(entries),
        None,
        Some(Meta { total }),
    )))
}
