use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::badges::models::{Badge, EarnedBadge};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BadgeResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: i32,
}

impl From<Badge> for BadgeResponseDto {
    fn from(b: Badge) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            icon: b.icon,
            points_required: b.points_required,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EarnedBadgeResponseDto {
    #[serde(flatten)]
    pub badge: BadgeResponseDto,
    pub earned_at: DateTime<Utc>,
}

impl From<EarnedBadge> for EarnedBadgeResponseDto {
    fn from(b: EarnedBadge) -> Self {
        Self {
            badge: BadgeResponseDto {
                id: b.id,
                name: b.name,
                description: b.description,
                icon: b.icon,
                points_required: b.points_required,
            },
            earned_at: b.earned_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earned_badge_serializes_flat() {
        let earned = EarnedBadgeResponseDto::from(EarnedBadge {
            id: Uuid::new_v4(),
            name: "First Report".to_string(),
            description: None,
            icon: Some("flag".to_string()),
            points_required: 10,
            earned_at: Utc::now(),
        });

        let value = serde_json::to_value(&earned).unwrap();
        assert_eq!(value["name"], "First Report");
        assert_eq!(value["points_required"], 10);
        assert!(value.get("earned_at").is_some());
        assert!(value.get("badge").is_none());
    }
}
