//! Multipart ingestion for videos and thumbnails

mod staging;
mod thumbnail;
mod video_ingest;

pub use staging::{stage_field, write_field, ScratchPath};
pub use thumbnail::{ingest_thumbnail, thumbnail_asset_path, THUMBNAIL_FIELD};
pub use video_ingest::{ingest_video, VIDEO_FIELD};
