//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use clipvault_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clipvault API",
        version = "0.1.0",
        description = "Video upload and listing backed by an external media-processing service, plus social-share image formatting."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_list::list_videos,
        handlers::image_upload::upload_image,
    ),
    components(
        schemas(
            models::VideoRecordResponse,
            models::ImageUploadResponse,
            models::FormattedImage,
            models::SocialFormat,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video upload and per-owner listing"),
        (name = "images", description = "Image upload with social media presets")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let spec = ApiDoc::openapi();
        for path in ["/api/video-upload", "/api/videos", "/api/image-upload"] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
