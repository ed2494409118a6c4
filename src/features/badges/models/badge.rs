use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a badge in the catalog
#[derive(Debug, Clone, FromRow)]
pub struct Badge {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: i32,
    pub created_at: DateTime<Utc>,
}

/// A badge joined with the moment a user earned it
#[derive(Debug, Clone, FromRow)]
pub struct EarnedBadge {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: i32,
    pub earned_at: DateTime<Utc>,
}
