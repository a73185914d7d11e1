//! In-process fakes for the processing traits.

use crate::aspect::VideoDimensions;
use crate::error::{ProcessingError, ProcessingResult};
use crate::traits::{processing_output_path, MediaProber, StreamingOptimizer};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prober that reports fixed dimensions, or a probe failure when built with [`FakeProber::failing`].
pub struct FakeProber {
    dimensions: Option<VideoDimensions>,
    calls: AtomicUsize,
}

impl FakeProber {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some(VideoDimensions { width, height }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            dimensions: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProber for FakeProber {
    async fn probe_dimensions(&self, path: &Path) -> ProcessingResult<VideoDimensions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !path.exists() {
            return Err(ProcessingError::NotFound(path.to_path_buf()));
        }
        self.dimensions
            .ok_or_else(|| ProcessingError::ProbeFailed("fake probe failure".to_string()))
    }
}

/// Optimizer that copies its input to `<input>.processing`.
#[derive(Default)]
pub struct FakeOptimizer {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamingOptimizer for FakeOptimizer {
    async fn optimize(&self, input: &Path) -> ProcessingResult<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProcessingError::TranscodeFailed("fake transcode failure".to_string()));
        }
        let output = processing_output_path(input);
        tokio::fs::copy(input, &output).await?;
        Ok(output)
    }
}
