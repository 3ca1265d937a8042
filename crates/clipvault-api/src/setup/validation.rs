//! Configuration validation
//!
//! Checks values that parse fine but would misbehave at runtime.

use anyhow::Result;
use clipvault_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins.iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via CORS_ORIGINS."
        ));
    }

    if config.db_max_connections == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.store_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("STORE_TIMEOUT_SECS cannot be 0"));
    }

    if config.gateway_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("GATEWAY_TIMEOUT_SECS cannot be 0"));
    }

    if config.max_video_size_bytes == 0 || config.max_image_size_bytes == 0 {
        return Err(anyhow::anyhow!("Upload size limits must be greater than 0"));
    }

    if config.is_production() && config.auth.jwt_public_key.is_none() {
        tracing::warn!("Sessions verified with a shared secret in production; prefer AUTH_JWT_PUBLIC_KEY");
    }

    Ok(())
}
