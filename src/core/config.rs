use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Access token verification settings.
///
/// Tokens are HS256 JWTs signed with a secret shared with the identity
/// provider.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub audience: String,
    pub issuer: Option<String>,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for report images
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Endpoint used when building public URLs (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
    /// Prefix readable without credentials (e.g., "public")
    pub public_prefix: String,
}

/// Reverse geocoding provider (Nominatim-compatible)
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 60 * 1024 * 1024; // 5 images + form fields

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_or_default("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_or_default("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_or_default(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_or_default(
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_or_default(
                "DB_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_AUDIENCE: &'static str = "authenticated";
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "AUTH_JWT_SECRET environment variable is required".to_string())?;

        let audience =
            env::var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| Self::DEFAULT_AUDIENCE.to_string());

        let issuer = env::var("AUTH_JWT_ISSUER").ok().filter(|s| !s.is_empty());

        let jwt_leeway_secs = parse_or_default("JWT_LEEWAY", Self::DEFAULT_JWT_LEEWAY_SECS)?;

        Ok(Self {
            jwt_secret,
            audience,
            issuer,
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Civic Engage API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Citizen issue reporting, tracking and civic education".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key: env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string()),
            secret_key: env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string()),
            bucket: env::var("MINIO_BUCKET").unwrap_or_else(|_| "report-images".to_string()),
            region: env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            public_prefix: env::var("MINIO_PUBLIC_PREFIX")
                .unwrap_or_else(|_| "public".to_string()),
        })
    }
}

impl GeocodingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOCODING_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let user_agent = env::var("GEOCODING_USER_AGENT")
            .unwrap_or_else(|_| "CivicEngageCore/0.1 (citizen-report-system)".to_string());
        let timeout_secs = parse_or_default("GEOCODING_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr + ToString,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", key))
}
