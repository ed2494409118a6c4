use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application role carried in the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    Moderator,
    User,
}

impl FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(AppRole::Admin),
            "moderator" => Ok(AppRole::Moderator),
            "user" => Ok(AppRole::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppRole::Admin => write!(f, "admin"),
            AppRole::Moderator => write!(f, "moderator"),
            AppRole::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<AppRole>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: AppRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(AppRole::Admin)
    }

    /// Staff may read the triage views (admin or moderator)
    pub fn has_staff_access(&self) -> bool {
        self.is_admin() || self.has_role(AppRole::Moderator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(roles: Vec<AppRole>) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: None,
            roles,
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<AppRole>(), Ok(AppRole::Admin));
        assert_eq!(" Moderator ".parse::<AppRole>(), Ok(AppRole::Moderator));
        assert_eq!("user".parse::<AppRole>(), Ok(AppRole::User));
        assert!("super_admin".parse::<AppRole>().is_err());
    }

    #[test]
    fn test_access_levels() {
        let admin = user_with(vec![AppRole::Admin]);
        assert!(admin.is_admin());
        assert!(admin.has_staff_access());

        let moderator = user_with(vec![AppRole::Moderator]);
        assert!(!moderator.is_admin());
        assert!(moderator.has_staff_access());

        let citizen = user_with(vec![AppRole::User]);
        assert!(!citizen.is_admin());
        assert!(!citizen.has_staff_access());
    }
}
