//! Video upload flow: authenticate, validate, submit to the gateway, persist.

use clipvault_core::models::{NewVideoRecord, TransformDirective, VideoRecord};
use clipvault_core::AppError;
use clipvault_db::VideoStore;
use clipvault_gateway::MediaGateway;
use std::future::Future;
use std::sync::Arc;

use crate::auth::AuthenticatedUser;
use crate::services::form::VideoUploadForm;
use crate::state::AppState;

pub struct VideoUploadService {
    store: Arc<dyn VideoStore>,
    gateway: Option<Arc<dyn MediaGateway>>,
}

impl VideoUploadService {
    pub fn new(store: Arc<dyn VideoStore>, gateway: Option<Arc<dyn MediaGateway>>) -> Self {
        Self { store, gateway }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.store.clone(), state.gateway.clone())
    }

    /// Run one upload to completion.
    ///
    /// `form` is only awaited after the caller and the gateway configuration
    /// have been checked, so an unauthenticated request never has its body read.
    /// Steps run strictly in order and the first failure ends the request:
    /// nothing is written before the gateway accepts the payload.
    pub async fn upload<F>(
        &self,
        caller: Option<&AuthenticatedUser>,
        form: F,
    ) -> Result<VideoRecord, AppError>
    where
        F: Future<Output = Result<VideoUploadForm, AppError>>,
    {
        let caller = caller.ok_or_else(|| {
            AppError::Unauthenticated("video upload requires a signed-in user".to_string())
        })?;
        let gateway = self.gateway.as_ref().ok_or_else(|| {
            AppError::Configuration("media gateway credentials are not configured".to_string())
        })?;

        let form = form.await?;
        tracing::debug!(
            user_id = %caller.user_id,
            file_bytes = form.file.len(),
            original_size = form.original_size,
            "Video upload validated"
        );

        let asset = gateway
            .submit(form.file, &TransformDirective::video_upload())
            .await?;

        let record = NewVideoRecord {
            title: form.title,
            description: form.description,
            asset_id: asset.asset_id.clone(),
            original_size: form.original_size.to_string(),
            processed_size: asset.processed_size.to_string(),
            duration: asset.duration.unwrap_or(0.0),
            owner_id: caller.user_id.clone(),
        };

        match self.store.create(record).await {
            Ok(video) => {
                tracing::info!(
                    video_id = %video.id,
                    asset_id = %video.asset_id,
                    user_id = %video.owner_id,
                    "Video uploaded"
                );
                Ok(video)
            }
            Err(e) => {
                // No compensating delete: the gateway asset stays behind.
                tracing::warn!(
                    asset_id = %asset.asset_id,
                    error = %e,
                    "Video record not saved; gateway asset is orphaned"
                );
                Err(e)
            }
        }
    }
}
