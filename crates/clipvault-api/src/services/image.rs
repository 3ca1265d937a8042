//! Social-share image upload: the gateway stores the source image once and
//! every preset is a delivery URL that crops it on the fly.

use clipvault_core::models::{
    FormattedImage, ImageUploadResponse, ResourceType, SocialFormat, TransformDirective,
};
use clipvault_core::AppError;
use clipvault_gateway::MediaGateway;
use std::future::Future;
use std::sync::Arc;

use crate::auth::AuthenticatedUser;
use crate::services::form::ImageUploadForm;

const DELIVERY_EXTENSION: &str = "png";

pub struct ImageUploadService {
    gateway: Option<Arc<dyn MediaGateway>>,
}

impl ImageUploadService {
    pub fn new(gateway: Option<Arc<dyn MediaGateway>>) -> Self {
        Self { gateway }
    }

    pub async fn upload<F>(
        &self,
        caller: Option<&AuthenticatedUser>,
        form: F,
    ) -> Result<ImageUploadResponse, AppError>
    where
        F: Future<Output = Result<ImageUploadForm, AppError>>,
    {
        let caller = caller.ok_or_else(|| {
            AppError::Unauthenticated("image upload requires a signed-in user".to_string())
        })?;
        let gateway = self.gateway.as_ref().ok_or_else(|| {
            AppError::Configuration("media gateway credentials are not configured".to_string())
        })?;

        let form = form.await?;
        let asset = gateway
            .submit(form.file, &TransformDirective::image_upload())
            .await?;

        tracing::info!(
            user_id = %caller.user_id,
            asset_id = %asset.asset_id,
            "Social image uploaded"
        );

        let formats = SocialFormat::ALL
            .iter()
            .map(|format| {
                let url = gateway.delivery_url(
                    &asset.asset_id,
                    ResourceType::Image,
                    Some(&format.delivery_transformation()),
                    Some(DELIVERY_EXTENSION),
                );
                FormattedImage::new(*format, url)
            })
            .collect();

        Ok(ImageUploadResponse {
            public_id: asset.asset_id,
            width: asset.width,
            height: asset.height,
            formats,
        })
    }
}
