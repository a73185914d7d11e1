use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::AppError;

/// A video record. `video_url` holds either a plain URL or a `bucket,key` descriptor
/// (see [`VideoLocation`]); `thumbnail_url` always holds a plain URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl Video {
    /// Whether `user_id` owns this record.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            created_at: video.created_at,
            updated_at: video.updated_at,
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            user_id: video.user_id,
        }
    }
}

/// Body of `POST /videos`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateVideoParams {
    #[validate(
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Title must not be blank".into()));
    }
    Ok(())
}

/// Parsed form of a stored `video_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoLocation<'a> {
    /// Fully-qualified URL, returned to clients as-is.
    Plain(&'a str),
    /// Object in a bucket, signed on read.
    Composite { bucket: &'a str, key: &'a str },
}

impl<'a> VideoLocation<'a> {
    /// Parse a stored URL. Exactly one comma with two non-empty parts is a composite
    /// descriptor; no comma and an http(s) scheme is a plain URL; anything else is malformed.
    pub fn parse(raw: &'a str) -> Result<Self, AppError> {
        match raw.matches(',').count() {
            0 if raw.starts_with("https://") || raw.starts_with("http://") => {
                Ok(VideoLocation::Plain(raw))
            }
            1 => match raw.split_once(',') {
                Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                    Ok(VideoLocation::Composite { bucket, key })
                }
                _ => Err(AppError::MalformedUrlDescriptor(format!(
                    "descriptor '{}' has an empty bucket or key",
                    raw
                ))),
            },
            0 => Err(AppError::MalformedUrlDescriptor(format!(
                "'{}' is neither a URL nor a bucket,key descriptor",
                raw
            ))),
            n => Err(AppError::MalformedUrlDescriptor(format!(
                "descriptor '{}' has {} parts, expected 2",
                raw,
                n + 1
            ))),
        }
    }

    /// Build the `bucket,key` descriptor persisted after an upload.
    pub fn composite_descriptor(bucket: &str, key: &str) -> String {
        format!("{},{}", bucket, key)
    }
}
