use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::badges::dtos::{BadgeResponseDto, EarnedBadgeResponseDto};
use crate::features::badges::models::{Badge, EarnedBadge};

/// Service for the badge catalog and earned badges
pub struct BadgeService {
    pool: PgPool,
}

impl BadgeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Catalog ordered by points required, then name
    pub async fn list_catalog(&self) -> Result<Vec<BadgeResponseDto>> {
        let badges = sqlx::query_as::<_, Badge>(
            "SELECT * FROM badges ORDER BY points_required ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list badges: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(badges.into_iter().map(Into::into).collect())
    }

    /// Badges earned by a user, newest first
    pub async fn list_earned(&self, user_id: Uuid) -> Result<Vec<EarnedBadgeResponseDto>> {
        let badges = sqlx::query_as::<_, EarnedBadge>(
            r#"
            SELECT b.id, b.name, b.description, b.icon, b.points_required, ub.earned_at
            FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = $1
            ORDER BY ub.earned_at DESC, b.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list badges for {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        Ok(badges.into_iter().map(Into::into).collect())
    }
}
