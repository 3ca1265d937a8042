use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use clipvault_core::models::VideoRecordResponse;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListVideosQuery {
    /// Owner whose videos are listed; blank or absent yields an empty list.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "Videos for the owner, newest first", body = Vec<VideoRecordResponse>),
        (status = 500, description = "Store read failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_videos"))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListVideosQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let owner_id = query.user_id.as_deref().unwrap_or_default();
    let videos = state.store.list_by_owner(owner_id).await?;

    let response: Vec<VideoRecordResponse> =
        videos.into_iter().map(VideoRecordResponse::from).collect();
    Ok(Json(response))
}
