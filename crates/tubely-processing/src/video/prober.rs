//! Stream geometry via ffprobe

use crate::aspect::VideoDimensions;
use crate::error::{ProcessingError, ProcessingResult};
use crate::traits::MediaProber;
use crate::video::validate_tool_path;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Extract the first video stream's dimensions from ffprobe's JSON output.
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<VideoDimensions> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| ProcessingError::MalformedProbeOutput(e.to_string()))?;

    let stream = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref().map_or(true, |t| t == "video"))
        .ok_or(ProcessingError::NoVideoStream)?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(VideoDimensions { width, height }),
        _ => Err(ProcessingError::MalformedProbeOutput(
            "video stream has no width or height".to_string(),
        )),
    }
}

pub struct VideoProber {
    ffprobe_path: String,
}

impl VideoProber {
    pub fn new(ffprobe_path: impl Into<String>) -> ProcessingResult<Self> {
        let ffprobe_path = ffprobe_path.into();
        validate_tool_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProber for VideoProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe_dimensions(&self, path: &Path) -> ProcessingResult<VideoDimensions> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ProcessingError::NotFound(path.to_path_buf()));
        }

        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "v:0",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessingError::ProbeFailed(format!("failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                status = %output.status,
                stderr = %stderr,
                "ffprobe exited with failure"
            );
            return Err(ProcessingError::ProbeFailed(stderr.trim().to_string()));
        }

        let dimensions = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            width = dimensions.width,
            height = dimensions.height,
            "Video probe completed"
        );

        Ok(dimensions)
    }
}
