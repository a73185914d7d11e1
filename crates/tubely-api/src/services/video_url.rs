//! Turning persisted `video_url` values into URLs a client can fetch

use std::time::Duration;
use tubely_core::models::{Video, VideoLocation};
use tubely_core::AppError;
use tubely_storage::Storage;

/// Replace a composite `bucket,key` descriptor with a signed URL valid for `expiry`.
/// Missing and plain URLs pass through unchanged.
pub async fn resolve_video_url(
    storage: &dyn Storage,
    mut video: Video,
    expiry: Duration,
) -> Result<Video, AppError> {
    let Some(raw) = video.video_url.as_deref() else {
        return Ok(video);
    };

    let signed = match VideoLocation::parse(raw)? {
        VideoLocation::Plain(_) => None,
        VideoLocation::Composite { bucket, key } => {
            Some(storage.presigned_get(bucket, key, expiry).await?)
        }
    };

    if let Some(url) = signed {
        video.video_url = Some(url);
    }
    Ok(video)
}

pub async fn resolve_video_urls(
    storage: &dyn Storage,
    videos: Vec<Video>,
    expiry: Duration,
) -> Result<Vec<Video>, AppError> {
    let mut resolved = Vec::with_capacity(videos.len());
    for video in videos {
        resolved.push(resolve_video_url(storage, video, expiry).await?);
    }
    Ok(resolved)
}
