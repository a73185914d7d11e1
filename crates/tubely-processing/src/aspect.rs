//! Aspect ratio classification.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Width and height of a video stream, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// Aspect ratio bucket used to pick the storage prefix of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "other")]
    Other,
}

impl AspectRatio {
    /// Classify with exact integer arithmetic: `w/h == 16/9` iff `w*9 == h*16`.
    /// Zero-sized streams are `Other`.
    pub fn classify(dimensions: VideoDimensions) -> Self {
        let width = u64::from(dimensions.width);
        let height = u64::from(dimensions.height);

        if width == 0 || height == 0 {
            return AspectRatio::Other;
        }
        if width * 9 == height * 16 {
            AspectRatio::Landscape
        } else if width * 16 == height * 9 {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    /// Ratio label: `"16:9"`, `"9:16"` or `"other"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    /// Storage key prefix: `landscape`, `portrait` or `other`.
    pub fn orientation_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(width: u32, height: u32) -> AspectRatio {
        AspectRatio::classify(VideoDimensions { width, height })
    }

    #[test]
    fn test_landscape_resolutions() {
        assert_eq!(classify(1920, 1080), AspectRatio::Landscape);
        assert_eq!(classify(1280, 720), AspectRatio::Landscape);
        assert_eq!(classify(3840, 2160), AspectRatio::Landscape);
    }

    #[test]
    fn test_portrait_resolutions() {
        assert_eq!(classify(1080, 1920), AspectRatio::Portrait);
        assert_eq!(classify(720, 1280), AspectRatio::Portrait);
    }

    #[test]
    fn test_other_resolutions() {
        assert_eq!(classify(640, 480), AspectRatio::Other);
        assert_eq!(classify(1080, 1080), AspectRatio::Other);
        // 16:9 under truncating integer division, but not exactly.
        assert_eq!(classify(1921, 1080), AspectRatio::Other);
        assert_eq!(classify(1000, 562), AspectRatio::Other);
    }

    #[test]
    fn test_zero_dimensions_are_other() {
        assert_eq!(classify(0, 0), AspectRatio::Other);
        assert_eq!(classify(1920, 0), AspectRatio::Other);
    }

    #[test]
    fn test_no_overflow_on_large_dimensions() {
        assert_eq!(classify(u32::MAX, u32::MAX), AspectRatio::Other);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AspectRatio::Landscape.as_str(), "16:9");
        assert_eq!(AspectRatio::Portrait.to_string(), "9:16");
        assert_eq!(AspectRatio::Other.orientation_prefix(), "other");
        assert_eq!(AspectRatio::Landscape.orientation_prefix(), "landscape");
    }
}
