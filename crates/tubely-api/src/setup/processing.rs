//! ffprobe / ffmpeg wiring

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{FastStartOptimizer, MediaProber, StreamingOptimizer, VideoProber};

pub fn setup_processing(
    config: &Config,
) -> Result<(Arc<dyn MediaProber>, Arc<dyn StreamingOptimizer>)> {
    let prober = VideoProber::new(config.ffprobe_path()).context("Invalid FFPROBE_PATH")?;
    let optimizer = FastStartOptimizer::new(config.ffmpeg_path()).context("Invalid FFMPEG_PATH")?;

    tracing::info!(
        ffprobe_path = %config.ffprobe_path(),
        ffmpeg_path = %config.ffmpeg_path(),
        "Media tools configured"
    );

    Ok((Arc::new(prober), Arc::new(optimizer)))
}
