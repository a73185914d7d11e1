//! Thumbnail upload: files land in the assets directory served under `/assets`

use crate::services::fetch_owned_video;
use crate::services::upload::staging::{write_field, ScratchPath};
use crate::state::AppState;
use crate::utils::upload::{extension_for, multipart_error, validate_content_type};
use axum::extract::multipart::Field;
use axum::extract::Multipart;
use std::path::PathBuf;
use tubely_core::models::Video;
use tubely_core::{AppError, Config};
use tubely_storage::random_object_id;
use uuid::Uuid;

/// Multipart field carrying the image bytes.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

const ALLOWED_THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/png"];

pub async fn ingest_thumbnail(
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
                AppError::BadRequest(format!("Missing multipart field '{}'", THUMBNAIL_FIELD))
            })?;

        if field.name() == Some(THUMBNAIL_FIELD) {
            return ingest_thumbnail_field(state, video_id, user_id, field).await;
        }
    }
}

#[tracing::instrument(skip(state, field), fields(video_id = %video_id, user_id = %user_id))]
async fn ingest_thumbnail_field(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
    mut field: Field<'_>,
) -> Result<Video, AppError> {
    let content_type = validate_content_type(field.content_type(), ALLOWED_THUMBNAIL_TYPES)?;
    let extension = extension_for(&content_type);

    let mut video = fetch_owned_video(state.videos.as_ref(), video_id, user_id).await?;
    let previous = video
        .thumbnail_url
        .as_deref()
        .and_then(|url| thumbnail_asset_path(&state.config, url));

    let assets_root = state.config.assets_root();
    tokio::fs::create_dir_all(assets_root)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create assets directory: {}", e)))?;

    let name = format!("{}.{}", random_object_id(), extension);
    let guard = ScratchPath::new(assets_root.join(&name));

    let mut file = tokio::fs::File::create(guard.path())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create thumbnail file: {}", e)))?;
    let size = write_field(&mut field, &mut file).await?;
    drop(file);

    video.thumbnail_url = Some(format!(
        "{}/assets/{}",
        state.config.public_base_url().trim_end_matches('/'),
        name
    ));
    let updated = state.videos.update(&video).await?;
    let path = guard.keep();

    if let Some(previous) = previous.filter(|p| *p != path) {
        if let Err(e) = tokio::fs::remove_file(&previous).await {
            tracing::debug!(error = %e, path = %previous.display(), "Previous thumbnail not removed");
        }
    }

    tracing::info!(
        path = %path.display(),
        size_bytes = size,
        content_type = %content_type,
        "Thumbnail upload completed"
    );

    Ok(updated)
}

/// Local file behind a thumbnail URL this service issued, if `url` is one.
pub fn thumbnail_asset_path(config: &Config, url: &str) -> Option<PathBuf> {
    let prefix = format!("{}/assets/", config.public_base_url().trim_end_matches('/'));
    let name = url.strip_prefix(&prefix)?;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return None;
    }
    Some(config.assets_root().join(name))
}
