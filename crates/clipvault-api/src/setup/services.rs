//! Wiring of the store, gateway and session verifier into `AppState`.

use anyhow::{Context, Result};
use clipvault_core::Config;
use clipvault_db::{VideoRepository, VideoStore};
use clipvault_gateway::{CloudinaryGateway, CloudinaryGatewayConfig, MediaGateway};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionVerifier;
use crate::state::{AppState, UploadLimits};

pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let store: Arc<dyn VideoStore> = Arc::new(VideoRepository::new(
        pool,
        Duration::from_secs(config.store_timeout_seconds),
    ));

    let gateway = match &config.gateway {
        Some(credentials) => {
            let gateway = CloudinaryGateway::new(CloudinaryGatewayConfig {
                credentials: credentials.clone(),
                api_base: config.gateway_api_base.clone(),
                delivery_base: config.gateway_delivery_base.clone(),
                timeout: Duration::from_secs(config.gateway_timeout_seconds),
            })
            .context("Failed to create media gateway client")?;
            tracing::info!(cloud_name = %credentials.cloud_name, "Media gateway configured");
            Some(Arc::new(gateway) as Arc<dyn MediaGateway>)
        }
        None => {
            tracing::warn!("Media gateway credentials missing; uploads will fail with a configuration error");
            None
        }
    };

    let sessions = SessionVerifier::from_config(&config.auth)
        .context("Failed to initialize session verification")?;

    Ok(Arc::new(AppState {
        store,
        gateway,
        sessions: Arc::new(sessions),
        limits: UploadLimits::from_config(config),
    }))
}
