use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::UpdateProfileDto;
use crate::features::profiles::models::Profile;

/// Service for citizen profiles
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the profile row on first access
    async fn ensure(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO profiles (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to ensure profile for {}: {:?}", user_id, e);
                AppError::Database(e)
            })?;
        Ok(())
    }

    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Profile> {
        self.ensure(user_id).await?;

        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Apply the provided fields; absent fields keep their stored value
    pub async fn update(&self, user_id: Uuid, dto: &UpdateProfileDto) -> Result<Profile> {
        self.ensure(user_id).await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                city = COALESCE($3, city),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(&dto.city)
        .bind(&dto.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Updated profile {}", user_id);
        Ok(profile)
    }
}
