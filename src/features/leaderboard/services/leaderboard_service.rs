use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::leaderboard::dtos::{build_leaderboard, LeaderboardEntryDto, LeaderboardRow};
use crate::shared::constants::LEADERBOARD_SIZE;

/// Service for the public points leaderboard
pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top profiles by points. Ties go to the earlier profile, then the lower id.
    pub async fn top(&self) -> Result<Vec<LeaderboardEntryDto>> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT id, full_name, avatar_url, city, points, created_at
            FROM profiles
            ORDER BY points DESC, created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(LEADERBOARD_SIZE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let badge_counts = self.badge_counts(&user_ids).await?;

        Ok(build_leaderboard(rows, &badge_counts))
    }

    /// Earned badge count per user, in one grouped query
    async fn badge_counts(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        let counts = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT user_id, COUNT(*)
            FROM user_badges
            WHERE user_id = ANY($1)
            GROUP BY user_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count badges for leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(counts.into_iter().collect())
    }
}
