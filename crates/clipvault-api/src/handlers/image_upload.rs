use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ImageUploadForm, ImageUploadService};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use clipvault_core::models::ImageUploadResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/image-upload",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Field: file (binary image)"),
    responses(
        (status = 200, description = "Image uploaded; one delivery URL per social preset", body = ImageUploadResponse),
        (status = 400, description = "Missing file", body = ErrorResponse),
        (status = 401, description = "No signed-in user", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Configuration or gateway failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, caller, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = ImageUploadService::new(state.gateway.clone());
    let response = service
        .upload(
            caller.user(),
            ImageUploadForm::read(multipart, state.limits.max_image_bytes),
        )
        .await?;

    Ok(Json(response))
}
