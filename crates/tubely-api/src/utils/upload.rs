//! Common utilities for file upload handlers

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tubely_core::AppError;

/// Normalize MIME type by stripping parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Check a part's declared content type against an allowlist and return the normalized type.
/// A missing content type is rejected like any other unlisted type.
pub fn validate_content_type(
    declared: Option<&str>,
    allowed_types: &[&str],
) -> Result<String, AppError> {
    let normalized = declared.map(normalize_mime_type).unwrap_or_default();
    if !allowed_types.iter().any(|ct| normalized == *ct) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Unsupported content type '{}'. Allowed types: {}",
            declared.unwrap_or("none"),
            allowed_types.join(", ")
        )));
    }
    Ok(normalized)
}

/// File extension for a normalized MIME type: its subtype ("image/png" -> "png").
pub fn extension_for(content_type: &str) -> &str {
    content_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(content_type)
}

/// Multipart read failures: body limit hits are 413, everything else is a malformed request.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("video/mp4"), "video/mp4");
        assert_eq!(normalize_mime_type("Video/MP4; codecs=avc1"), "video/mp4");
        assert_eq!(normalize_mime_type(" image/png "), "image/png");
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("video/mp4"), "mp4");
        assert_eq!(extension_for("image/jpeg"), "jpeg");
        assert_eq!(extension_for("png"), "png");
    }

    #[test]
    fn test_validate_content_type() {
        assert_eq!(
            validate_content_type(Some("video/mp4"), &["video/mp4"]).unwrap(),
            "video/mp4"
        );
        assert!(matches!(
            validate_content_type(Some("video/quicktime"), &["video/mp4"]),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_content_type(None, &["image/jpeg", "image/png"]),
            Err(AppError::UnsupportedMediaType(_))
        ));
        // Parameters cannot smuggle a disallowed type through.
        assert!(validate_content_type(Some("image/gif; x=image/png"), &["image/png"]).is_err());
    }
}
