use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use crate::constants::{IMAGE_UPLOAD_FOLDER, VIDEO_TRANSFORMATION, VIDEO_UPLOAD_FOLDER};

/// Kind of asset the media gateway is asked to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Image,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Image => "image",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Instruction passed through to the media gateway alongside the raw bytes.
///
/// The contents are opaque to the rest of the application; only the gateway
/// client interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformDirective {
    pub resource_type: ResourceType,
    pub folder: String,
    /// Incoming transformation applied by the gateway before storing the asset.
    pub transformation: Option<String>,
}

impl TransformDirective {
    /// Directive used for every video upload: widely compatible MP4 at automatic quality.
    pub fn video_upload() -> Self {
        Self {
            resource_type: ResourceType::Video,
            folder: VIDEO_UPLOAD_FOLDER.to_string(),
            transformation: Some(VIDEO_TRANSFORMATION.to_string()),
        }
    }

    /// Directive used for social-share images; cropping happens at delivery time.
    pub fn image_upload() -> Self {
        Self {
            resource_type: ResourceType::Image,
            folder: IMAGE_UPLOAD_FOLDER.to_string(),
            transformation: None,
        }
    }
}

/// What the gateway reports back for a processed asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    pub asset_id: String,
    pub processed_size: u64,
    pub duration: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_directive_targets_mp4_auto_quality() {
        let directive = TransformDirective::video_upload();
        assert_eq!(directive.resource_type, ResourceType::Video);
        assert_eq!(directive.folder, "video-uploads");
        assert_eq!(directive.transformation.as_deref(), Some("q_auto,f_mp4"));
    }

    #[test]
    fn test_image_directive_has_no_incoming_transformation() {
        let directive = TransformDirective::image_upload();
        assert_eq!(directive.resource_type, ResourceType::Image);
        assert!(directive.transformation.is_none());
    }

    #[test]
    fn test_resource_type_display() {
        assert_eq!(ResourceType::Video.to_string(), "video");
        assert_eq!(ResourceType::Image.to_string(), "image");
    }
}
