//! Fast-start remux via ffmpeg

use crate::error::{ProcessingError, ProcessingResult};
use crate::traits::{processing_output_path, StreamingOptimizer};
use crate::video::validate_tool_path;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Moves the `moov` atom to the front of an MP4 without re-encoding.
pub struct FastStartOptimizer {
    ffmpeg_path: String,
}

impl FastStartOptimizer {
    pub fn new(ffmpeg_path: impl Into<String>) -> ProcessingResult<Self> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_tool_path(&ffmpeg_path)?;
        Ok(Self { ffmpeg_path })
    }
}

#[async_trait]
impl StreamingOptimizer for FastStartOptimizer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn optimize(&self, input: &Path) -> ProcessingResult<PathBuf> {
        if !tokio::fs::try_exists(input).await.unwrap_or(false) {
            return Err(ProcessingError::NotFound(input.to_path_buf()));
        }

        let output_path = processing_output_path(input);
        let start = std::time::Instant::now();

        let result = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "+faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let failure = match result {
            Ok(output) if output.status.success() => None,
            Ok(output) => Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            Err(e) => Some(format!("failed to execute ffmpeg: {}", e)),
        };

        if let Some(message) = failure {
            tracing::warn!(error = %message, "ffmpeg faststart failed");
            if let Err(e) = tokio::fs::remove_file(&output_path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %e,
                        path = %output_path.display(),
                        "Failed to remove partial ffmpeg output"
                    );
                }
            }
            return Err(ProcessingError::TranscodeFailed(message));
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "Faststart remux completed"
        );

        Ok(output_path)
    }
}
