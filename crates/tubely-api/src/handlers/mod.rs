pub mod thumbnail_upload;
pub mod video_meta;
pub mod video_upload;
