//! Best-effort removal of a deleted video's stored object and thumbnail

use crate::services::upload::thumbnail_asset_path;
use crate::state::AppState;
use tubely_core::models::{Video, VideoLocation};

/// Remove what `video` points at. Failures are logged; the metadata row is already gone.
pub async fn remove_stored_assets(state: &AppState, video: &Video) {
    if let Some(raw) = video.video_url.as_deref() {
        match VideoLocation::parse(raw) {
            Ok(VideoLocation::Composite { bucket, key }) if bucket == state.storage.bucket() => {
                if let Err(e) = state.storage.delete(key).await {
                    tracing::warn!(
                        error = %e,
                        video_id = %video.id,
                        bucket = %bucket,
                        key = %key,
                        "Failed to delete stored video object"
                    );
                }
            }
            Ok(VideoLocation::Composite { bucket, key }) => {
                tracing::warn!(
                    video_id = %video.id,
                    bucket = %bucket,
                    key = %key,
                    "Stored video object is in another bucket; not deleted"
                );
            }
            Ok(VideoLocation::Plain(_)) => {}
            Err(e) => {
                tracing::warn!(error = %e, video_id = %video.id, "Unparseable video_url on delete");
            }
        }
    }

    if let Some(path) = video
        .thumbnail_url
        .as_deref()
        .and_then(|url| thumbnail_asset_path(&state.config, url))
    {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    video_id = %video.id,
                    path = %path.display(),
                    "Failed to delete thumbnail file"
                );
            }
        }
    }
}
