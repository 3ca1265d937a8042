use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Social media presets an uploaded image can be reformatted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SocialFormat {
    InstagramSquare,
    InstagramPortrait,
    TwitterPost,
    TwitterHeader,
    FacebookCover,
}

impl SocialFormat {
    pub const ALL: [SocialFormat; 5] = [
        SocialFormat::InstagramSquare,
        SocialFormat::InstagramPortrait,
        SocialFormat::TwitterPost,
        SocialFormat::TwitterHeader,
        SocialFormat::FacebookCover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialFormat::InstagramSquare => "Instagram Square (1:1)",
            SocialFormat::InstagramPortrait => "Instagram Portrait (4:5)",
            SocialFormat::TwitterPost => "Twitter Post (16:9)",
            SocialFormat::TwitterHeader => "Twitter Header (3:1)",
            SocialFormat::FacebookCover => "Facebook Cover (205:78)",
        }
    }

    /// Target (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SocialFormat::InstagramSquare => (1080, 1080),
            SocialFormat::InstagramPortrait => (1080, 1350),
            SocialFormat::TwitterPost => (1200, 675),
            SocialFormat::TwitterHeader => (1500, 500),
            SocialFormat::FacebookCover => (820, 312),
        }
    }

    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            SocialFormat::InstagramSquare => "1:1",
            SocialFormat::InstagramPortrait => "4:5",
            SocialFormat::TwitterPost => "16:9",
            SocialFormat::TwitterHeader => "3:1",
            SocialFormat::FacebookCover => "205:78",
        }
    }

    /// Delivery-time transformation that fill-crops the image to this preset,
    /// letting the gateway pick the focal point.
    pub fn delivery_transformation(&self) -> String {
        let (width, height) = self.dimensions();
        format!(
            "c_fill,g_auto,w_{},h_{},ar_{}",
            width,
            height,
            self.aspect_ratio()
        )
    }

    /// File name offered when the formatted image is downloaded.
    pub fn download_file_name(&self) -> String {
        let slug = self
            .label()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        format!("{}.png", slug)
    }
}

impl Display for SocialFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// One social preset rendered for an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedImage {
    pub format: SocialFormat,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: String,
    pub url: String,
    pub download_file_name: String,
}

impl FormattedImage {
    pub fn new(format: SocialFormat, url: String) -> Self {
        let (width, height) = format.dimensions();
        Self {
            format,
            name: format.label().to_string(),
            width,
            height,
            aspect_ratio: format.aspect_ratio().to_string(),
            url,
            download_file_name: format.download_file_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub public_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub formats: Vec<FormattedImage>,
}
