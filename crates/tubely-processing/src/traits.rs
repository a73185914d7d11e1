//! Processing traits implemented by the ffmpeg-backed tools and by test fakes.

use crate::aspect::{AspectRatio, VideoDimensions};
use crate::error::ProcessingResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads stream geometry from a media file on disk.
#[async_trait]
pub trait MediaProber: Send + Sync {
    /// Width and height of the first video stream in `path`.
    async fn probe_dimensions(&self, path: &Path) -> ProcessingResult<VideoDimensions>;

    /// Classify the aspect ratio of the first video stream in `path`.
    async fn aspect_ratio(&self, path: &Path) -> ProcessingResult<AspectRatio> {
        let dimensions = self.probe_dimensions(path).await?;
        Ok(AspectRatio::classify(dimensions))
    }
}

/// Rewrites a video so its index precedes the media data.
#[async_trait]
pub trait StreamingOptimizer: Send + Sync {
    /// Write the optimized copy of `input` and return its path. The caller owns the
    /// returned file and must delete it.
    async fn optimize(&self, input: &Path) -> ProcessingResult<PathBuf>;
}

/// `<input>.processing`
pub fn processing_output_path(input: &Path) -> PathBuf {
    let mut raw = input.as_os_str().to_owned();
    raw.push(".processing");
    PathBuf::from(raw)
}
