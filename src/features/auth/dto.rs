use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::{AppRole, AuthenticatedUser};

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<AppRole>,
    pub is_admin: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            is_admin: user.is_admin(),
            user_id: user.user_id,
            email: user.email,
            roles: user.roles,
        }
    }
}
