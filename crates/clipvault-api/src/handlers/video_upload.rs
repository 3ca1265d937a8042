use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{VideoUploadForm, VideoUploadService};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use clipvault_core::models::VideoRecordResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/video-upload",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: file (binary), title, description (optional), originalSize"),
    responses(
        (status = 200, description = "Video uploaded and recorded", body = VideoRecordResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "No signed-in user", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Configuration, gateway or store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, caller, multipart), fields(operation = "upload_video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = VideoUploadService::from_state(&state);
    let video = service
        .upload(
            caller.user(),
            VideoUploadForm::read(multipart, state.limits.max_video_bytes),
        )
        .await?;

    Ok(Json(VideoRecordResponse::from(video)))
}
