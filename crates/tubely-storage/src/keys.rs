//! Shared key generation for storage backends.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Number of random bytes behind every generated object id.
pub const OBJECT_ID_BYTES: usize = 32;

/// 32 random bytes, URL-safe base64 without padding (43 characters).
pub fn random_object_id() -> String {
    let bytes: [u8; OBJECT_ID_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a video object key: `{orientation}/{random-id}.{extension}`.
///
/// Keys are unguessable rather than checked for collisions.
pub fn video_object_key(orientation: &str, extension: &str) -> String {
    format!("{}/{}.{}", orientation, random_object_id(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_is_url_safe_and_unpadded() {
        let id = random_object_id();
        assert_eq!(id.len(), 43);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn object_ids_differ() {
        assert_ne!(random_object_id(), random_object_id());
    }

    #[test]
    fn video_key_layout() {
        let key = video_object_key("portrait", "mp4");
        let (prefix, file) = key.split_once('/').unwrap();
        assert_eq!(prefix, "portrait");
        let (id, ext) = file.rsplit_once('.').unwrap();
        assert_eq!(id.len(), 43);
        assert_eq!(ext, "mp4");
    }
}
