use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::resolve_video_url;
use crate::services::upload::ingest_video;
use crate::state::AppState;
use crate::utils::path::VideoIdPath;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tubely_core::models::VideoResponse;

#[utoipa::path(
    post,
    path = "/videos/{id}/upload",
    tag = "videos",
    params(
        ("id" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Field `video`: an MP4 file"),
    responses(
        (status = 200, description = "Video stored; `video_url` is a signed URL", body = VideoResponse),
        (status = 400, description = "Invalid ID or malformed multipart body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not video/mp4", body = ErrorResponse),
        (status = 500, description = "Probe, transcode, upload or persistence failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(video_id = %id, user_id = %user.user_id, operation = "upload_video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    VideoIdPath(id): VideoIdPath,
    user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = ingest_video(&state, id, user.user_id, multipart).await?;

    let video = resolve_video_url(
        state.storage.as_ref(),
        video,
        state.config.signed_url_expiry(),
    )
    .await?;

    Ok(Json(VideoResponse::from(video)))
}
