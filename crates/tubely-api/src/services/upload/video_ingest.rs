//! Video upload pipeline: validate, stage, probe, optimize, store, persist

use crate::services::fetch_owned_video;
use crate::services::upload::staging::{stage_field, ScratchPath};
use crate::state::AppState;
use crate::utils::upload::{extension_for, multipart_error, validate_content_type};
use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tubely_core::models::{Video, VideoLocation};
use tubely_core::AppError;
use tubely_storage::video_object_key;
use uuid::Uuid;

/// Multipart field carrying the video bytes.
pub const VIDEO_FIELD: &str = "video";

const ALLOWED_VIDEO_TYPES: &[&str] = &["video/mp4"];

/// Run the upload pipeline for the `video` field of `multipart` and return the updated
/// record. `video_url` is the persisted `bucket,key` descriptor, not yet signed.
pub async fn ingest_video(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
    mut multipart: Multipart,
) -> Result<Video, AppError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing multipart field '{}'", VIDEO_FIELD))
            })?;

        if field.name() == Some(VIDEO_FIELD) {
            return ingest_video_field(state, video_id, user_id, field).await;
        }
    }
}

#[tracing::instrument(skip(state, field), fields(video_id = %video_id, user_id = %user_id))]
async fn ingest_video_field(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
    field: Field<'_>,
) -> Result<Video, AppError> {
    let start = std::time::Instant::now();

    // Checked before anything touches disk.
    let content_type = validate_content_type(field.content_type(), ALLOWED_VIDEO_TYPES)?;

    let mut video = fetch_owned_video(state.videos.as_ref(), video_id, user_id).await?;

    let staged = stage_field(field, state.config.scratch_dir(), ".mp4").await?;

    let aspect_ratio = state.prober.aspect_ratio(staged.path()).await?;
    tracing::debug!(aspect_ratio = %aspect_ratio, "Video classified");

    let optimized = ScratchPath::new(state.optimizer.optimize(staged.path()).await?);
    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, "Failed to remove staged upload");
    }

    let key = video_object_key(
        aspect_ratio.orientation_prefix(),
        extension_for(&content_type),
    );
    let size = state
        .storage
        .put_file(&key, &content_type, optimized.path())
        .await?;
    drop(optimized);

    video.video_url = Some(VideoLocation::composite_descriptor(
        state.storage.bucket(),
        &key,
    ));

    let updated = state.videos.update(&video).await.map_err(|e| {
        tracing::error!(
            error = %e,
            orphaned_key = %key,
            bucket = %state.storage.bucket(),
            "Stored video object but failed to record it"
        );
        AppError::Internal(format!("Failed to persist video URL: {}", e))
    })?;

    tracing::info!(
        key = %key,
        size_bytes = size,
        aspect_ratio = %aspect_ratio,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Video upload completed"
    );

    Ok(updated)
}
