use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::{ContactMessageResponseDto, CreateContactMessageDto};
use crate::features::contact::models::ContactMessage;

/// Service for the contact inbox
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact form submission
    pub async fn create(&self, dto: CreateContactMessageDto) -> Result<ContactMessageResponseDto> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, subject, message, created_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.email.trim())
        .bind(dto.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .bind(dto.message.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create contact message: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Contact message received: id={}, email={}",
            message.id,
            message.email
        );

        Ok(message.into())
    }

    /// Newest first
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ContactMessageResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count contact messages: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, subject, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC, id DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list contact messages: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
