use std::path::PathBuf;
use thiserror::Error;
use tubely_core::AppError;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    #[error("Malformed probe output: {0}")]
    MalformedProbeOutput(String),

    #[error("No video stream found")]
    NoVideoStream,

    #[error("Transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("Invalid tool path: {0}")]
    InvalidToolPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::ProbeFailed(msg) => AppError::ProbeFailed(msg),
            ProcessingError::MalformedProbeOutput(msg) => {
                AppError::ProbeFailed(format!("malformed output: {}", msg))
            }
            ProcessingError::NoVideoStream => {
                AppError::ProbeFailed("no video stream found".to_string())
            }
            ProcessingError::TranscodeFailed(msg) => AppError::TranscodeFailed(msg),
            ProcessingError::NotFound(path) => {
                AppError::Internal(format!("scratch file missing: {}", path.display()))
            }
            ProcessingError::InvalidToolPath(msg) => AppError::Internal(msg),
            ProcessingError::Io(e) => AppError::Internal(format!("IO error: {}", e)),
        }
    }
}
