//! Application state shared by all handlers.

use clipvault_core::Config;
use clipvault_db::VideoStore;
use clipvault_gateway::MediaGateway;
use std::sync::Arc;

use crate::auth::SessionVerifier;

/// Per-media-type payload ceilings, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_video_bytes: usize,
    pub max_image_bytes: usize,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_video_bytes: config.max_video_size_bytes,
            max_image_bytes: config.max_image_size_bytes,
        }
    }

    pub fn largest(&self) -> usize {
        self.max_video_bytes.max(self.max_image_bytes)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VideoStore>,
    /// `None` when gateway credentials are not configured.
    pub gateway: Option<Arc<dyn MediaGateway>>,
    pub sessions: Arc<SessionVerifier>,
    pub limits: UploadLimits,
}
