use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Profile columns needed to rank a citizen
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// 1-based position in the leaderboard
    pub rank: usize,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub points: i32,
    pub badge_count: i64,
}

/// Rank rows in the order they were fetched. Users without badges get 0.
pub fn build_leaderboard(
    rows: Vec<LeaderboardRow>,
    badge_counts: &HashMap<Uuid, i64>,
) -> Vec<LeaderboardEntryDto> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| LeaderboardEntryDto {
            rank: index + 1,
            badge_count: badge_counts.get(&row.id).copied().unwrap_or(0),
            user_id: row.id,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            city: row.city,
            points: row.points,
        })
        .collect()
}
