//! Tubely media processing
//!
//! Wraps `ffprobe` and `ffmpeg` behind the [`MediaProber`] and [`StreamingOptimizer`]
//! traits so the ingestion pipeline can run against fakes in tests.

pub mod aspect;
pub mod error;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod traits;
pub mod video;

pub use aspect::{AspectRatio, VideoDimensions};
pub use error::{ProcessingError, ProcessingResult};
pub use traits::{processing_output_path, MediaProber, StreamingOptimizer};
pub use video::{FastStartOptimizer, VideoProber};
