//! Data models for the application

mod video;

pub use video::{CreateVideoParams, Video, VideoLocation, VideoResponse};
