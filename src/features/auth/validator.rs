use super::model::{AppRole, AuthenticatedUser};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    /// Role injected by the identity provider's access-token hook
    #[serde(default)]
    user_role: Option<String>,
    #[serde(default)]
    app_metadata: Option<AppMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AppMetadata {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl Claims {
    /// Every recognised role string in the token; `user` when none is present.
    fn roles(&self) -> Vec<AppRole> {
        let metadata = self.app_metadata.clone().unwrap_or_default();
        let mut roles: Vec<AppRole> = self
            .user_role
            .iter()
            .chain(metadata.role.iter())
            .chain(metadata.roles.iter())
            .filter_map(|raw| match raw.parse::<AppRole>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::debug!("Ignoring role claim: {}", e);
                    None
                }
            })
            .collect();

        roles.sort_by_key(|r| *r as u8);
        roles.dedup();

        if roles.is_empty() {
            roles.push(AppRole::User);
        }
        roles
    }
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Token subject is not a valid user id".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            roles: claims.roles(),
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::time::Duration;

    const SECRET: &str = "test-secret-with-enough-length-for-hs256";

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            audience: "authenticated".to_string(),
            issuer: None,
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn sign(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_defaults_to_user_role() {
        let user_id = Uuid::new_v4();
        let token = sign(
            json!({"sub": user_id.to_string(), "aud": "authenticated", "exp": exp(), "email": "a@b.id"}),
            SECRET,
        );

        let user = JwtValidator::new(&config()).validate_token(&token).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email.as_deref(), Some("a@b.id"));
        assert_eq!(user.roles, vec![AppRole::User]);
    }

    #[test]
    fn test_roles_from_claims_are_merged() {
        let token = sign(
            json!({
                "sub": Uuid::new_v4().to_string(),
                "aud": "authenticated",
                "exp": exp(),
                "user_role": "admin",
                "app_metadata": {"roles": ["moderator", "admin", "unknown"]}
            }),
            SECRET,
        );

        let user = JwtValidator::new(&config()).validate_token(&token).unwrap();
        assert_eq!(user.roles, vec![AppRole::Admin, AppRole::Moderator]);
        assert!(user.is_admin());
    }

    #[test]
    fn test_rejects_wrong_secret_audience_and_subject() {
        let validator = JwtValidator::new(&config());

        let wrong_secret = sign(
            json!({"sub": Uuid::new_v4().to_string(), "aud": "authenticated", "exp": exp()}),
            "another-secret-entirely-different",
        );
        assert!(validator.validate_token(&wrong_secret).is_err());

        let wrong_audience = sign(
            json!({"sub": Uuid::new_v4().to_string(), "aud": "anon", "exp": exp()}),
            SECRET,
        );
        assert!(validator.validate_token(&wrong_audience).is_err());

        let bad_subject = sign(
            json!({"sub": "not-a-uuid", "aud": "authenticated", "exp": exp()}),
            SECRET,
        );
        assert!(validator.validate_token(&bad_subject).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = sign(
            json!({
                "sub": Uuid::new_v4().to_string(),
                "aud": "authenticated",
                "exp": chrono::Utc::now().timestamp() - 600
            }),
            SECRET,
        );
        assert!(JwtValidator::new(&config()).validate_token(&token).is_err());
    }
}
