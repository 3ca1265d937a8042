//! Configuration module
//!
//! Application configuration is read from environment variables (optionally
//! seeded from a `.env` file). Missing required values surface as
//! `AppError::Configuration` so they are reported before any external call.

use std::env;

use crate::constants::BYTES_PER_MB;
use crate::AppError;

const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const STORE_TIMEOUT_SECS: u64 = 10;
const GATEWAY_TIMEOUT_SECS: u64 = 120;
const MAX_VIDEO_SIZE_MB: usize = 70;
const MAX_IMAGE_SIZE_MB: usize = 10;
const GATEWAY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
const GATEWAY_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Credentials for the external media-processing service.
#[derive(Clone)]
pub struct GatewayCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Session token verification settings for the external identity provider.
#[derive(Clone)]
pub struct AuthConfig {
    /// PEM-encoded RSA public key (RS256 tokens).
    pub jwt_public_key: Option<String>,
    /// Shared secret (HS256 tokens).
    pub jwt_secret: Option<String>,
    pub jwt_issuer: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_public_key", &self.jwt_public_key.is_some())
            .field("jwt_secret", &self.jwt_secret.is_some())
            .field("jwt_issuer", &self.jwt_issuer)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub store_timeout_seconds: u64,
    /// `None` when any of the three credentials is missing; uploads then fail
    /// with a configuration error instead of the server refusing to start.
    pub gateway: Option<GatewayCredentials>,
    pub gateway_api_base: String,
    pub gateway_delivery_base: String,
    pub gateway_timeout_seconds: u64,
    pub max_video_size_bytes: usize,
    pub max_image_size_bytes: usize,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = get("DATABASE_URL").ok_or_else(|| {
            AppError::Configuration("DATABASE_URL must be set".to_string())
        })?;

        let gateway = match (
            get("CLOUDINARY_CLOUD_NAME").or_else(|| get("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME")),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(GatewayCredentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        let auth = AuthConfig {
            jwt_public_key: get("AUTH_JWT_PUBLIC_KEY").map(|pem| pem.replace("\\n", "\n")),
            jwt_secret: get("AUTH_JWT_SECRET"),
            jwt_issuer: get("AUTH_JWT_ISSUER"),
        };
        if auth.jwt_public_key.is_none() && auth.jwt_secret.is_none() {
            return Err(AppError::Configuration(
                "AUTH_JWT_PUBLIC_KEY or AUTH_JWT_SECRET must be set to verify sessions"
                    .to_string(),
            ));
        }

        Ok(Config {
            server_port: parse_or(&get, "PORT", SERVER_PORT)?,
            environment,
            cors_origins,
            log_format: get("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
            database_url,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_or(&get, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            store_timeout_seconds: parse_or(&get, "STORE_TIMEOUT_SECS", STORE_TIMEOUT_SECS)?,
            gateway,
            gateway_api_base: get("CLOUDINARY_API_BASE")
                .unwrap_or_else(|| GATEWAY_API_BASE.to_string()),
            gateway_delivery_base: get("CLOUDINARY_DELIVERY_BASE")
                .unwrap_or_else(|| GATEWAY_DELIVERY_BASE.to_string()),
            gateway_timeout_seconds: parse_or(&get, "GATEWAY_TIMEOUT_SECS", GATEWAY_TIMEOUT_SECS)?,
            max_video_size_bytes: megabytes_or(&get, "MAX_VIDEO_SIZE_MB", MAX_VIDEO_SIZE_MB)?,
            max_image_size_bytes: megabytes_or(&get, "MAX_IMAGE_SIZE_MB", MAX_IMAGE_SIZE_MB)?,
            auth,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn gateway_configured(&self) -> bool {
        self.gateway.is_some()
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T, AppError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a valid number", key))),
        None => Ok(default),
    }
}

/// A size given in megabytes, converted to bytes.
fn megabytes_or<G>(get: &G, key: &str, default: usize) -> Result<usize, AppError>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default)?
        .checked_mul(BYTES_PER_MB)
        .ok_or_else(|| AppError::Configuration(format!("{} is too large", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/clipvault"),
        ("AUTH_JWT_SECRET", "dev-secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.max_video_size_bytes, 70 * 1024 * 1024);
        assert_eq!(config.max_image_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.store_timeout_seconds, 10);
        assert!(!config.gateway_configured());
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_database_url_is_configuration_error() {
        let err = Config::from_lookup(lookup(&[("AUTH_JWT_SECRET", "s")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_missing_auth_key_is_configuration_error() {
        let err =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x/y")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_gateway_requires_all_three_credentials() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CLOUDINARY_CLOUD_NAME", "demo"));
        pairs.push(("CLOUDINARY_API_KEY", "123"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert!(config.gateway.is_none());

        pairs.push(("CLOUDINARY_API_SECRET", "shh"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        let creds = config.gateway.unwrap();
        assert_eq!(creds.cloud_name, "demo");
        assert_eq!(creds.api_key, "123");
    }

    #[test]
    fn test_public_cloud_name_fallback() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME", "public-demo"),
            ("CLOUDINARY_API_KEY", "123"),
            ("CLOUDINARY_API_SECRET", "shh"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.gateway.unwrap().cloud_name, "public-demo");
    }

    #[test]
    fn test_oversized_megabyte_limit_is_rejected() {
        // usize::MAX on 64-bit targets
        let huge = "18446744073709551615";
        for key in ["MAX_VIDEO_SIZE_MB", "MAX_IMAGE_SIZE_MB"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push((key, huge));
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, AppError::Configuration(msg) if msg.contains(key)));
        }
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_VIDEO_SIZE_MB", "lots"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("MAX_VIDEO_SIZE_MB")));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "  "));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = GatewayCredentials {
            cloud_name: "demo".to_string(),
            api_key: "123".to_string(),
            api_secret: "very-secret".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("very-secret"));
    }
}
