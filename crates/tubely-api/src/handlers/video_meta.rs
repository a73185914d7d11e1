use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::cleanup::remove_stored_assets;
use crate::services::{fetch_owned_video, resolve_video_url, resolve_video_urls};
use crate::state::AppState;
use crate::utils::path::VideoIdPath;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tubely_core::models::{CreateVideoParams, VideoResponse};
use tubely_core::AppError;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/videos",
    tag = "videos",
    request_body = CreateVideoParams,
    responses(
        (status = 201, description = "Video record created", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, params), fields(user_id = %user.user_id, operation = "create_video"))]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(params): ValidatedJson<CreateVideoParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    params.validate().map_err(AppError::from)?;

    let video = state.videos.create(params, user.user_id).await?;
    tracing::info!(video_id = %video.id, "Video record created");

    Ok((StatusCode::CREATED, Json(VideoResponse::from(video))))
}

#[utoipa::path(
    get,
    path = "/videos/{id}",
    tag = "videos",
    params(
        ("id" = uuid::Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %id, operation = "get_video"))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    VideoIdPath(id): VideoIdPath,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .videos
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let video = resolve_video_url(
        state.storage.as_ref(),
        video,
        state.config.signed_url_expiry(),
    )
    .await?;

    Ok(Json(VideoResponse::from(video)))
}

#[utoipa::path(
    get,
    path = "/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Caller's videos, newest first", body = Vec<VideoResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id, operation = "list_videos"))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list_by_owner(user.user_id).await?;
    let videos = resolve_video_urls(
        state.storage.as_ref(),
        videos,
        state.config.signed_url_expiry(),
    )
    .await?;

    let response: Vec<VideoResponse> = videos.into_iter().map(VideoResponse::from).collect();
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/videos/{id}",
    tag = "videos",
    params(
        ("id" = uuid::Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(video_id = %id, user_id = %user.user_id, operation = "delete_video"))]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    VideoIdPath(id): VideoIdPath,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = fetch_owned_video(state.videos.as_ref(), id, user.user_id).await?;

    if !state.videos.delete(id).await? {
        return Err(AppError::NotFound("Video not found".to_string()).into());
    }
    tracing::info!("Video record deleted");

    remove_stored_assets(&state, &video).await;

    Ok(StatusCode::NO_CONTENT)
}
