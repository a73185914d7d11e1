//! ffprobe / ffmpeg backed implementations

mod optimizer;
mod prober;

pub use optimizer::FastStartOptimizer;
pub use prober::{parse_probe_output, VideoProber};

use crate::error::{ProcessingError, ProcessingResult};

/// Reject tool paths containing shell metacharacters or traversal sequences.
pub(crate) fn validate_tool_path(path: &str) -> ProcessingResult<()> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() {
        return Err(ProcessingError::InvalidToolPath("path is empty".to_string()));
    }
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProcessingError::InvalidToolPath(format!(
            "path contains dangerous characters: {}",
            path
        )));
    }
    if path.contains("..") {
        return Err(ProcessingError::InvalidToolPath(format!(
            "path contains directory traversal: {}",
            path
        )));
    }
    if !path
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '\\'))
    {
        return Err(ProcessingError::InvalidToolPath(format!(
            "path contains unsafe characters: {}",
            path
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tool_path() {
        assert!(validate_tool_path("ffprobe").is_ok());
        assert!(validate_tool_path("/usr/local/bin/ffmpeg").is_ok());
        assert!(validate_tool_path("ffprobe; rm -rf /").is_err());
        assert!(validate_tool_path("../bin/ffmpeg").is_err());
        assert!(validate_tool_path("").is_err());
    }
}
