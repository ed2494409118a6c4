use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::{AppRole, AuthenticatedUser};
use crate::features::profiles::models::Profile;

/// Profile of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub points: i32,
    pub roles: Vec<AppRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponseDto {
    /// Enrich the stored profile with the token's email and roles
    pub fn new(profile: Profile, user: &AuthenticatedUser) -> Self {
        Self {
            id: profile.id,
            email: user.email.clone(),
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            city: profile.city,
            points: profile.points,
            roles: user.roles.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Request DTO for updating the caller's profile. Points are not writable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateProfileDto {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.city.is_none() && self.avatar_url.is_none()
    }
}
