//! Request-independent business logic used by the handlers

pub mod cleanup;
pub mod ownership;
pub mod upload;
pub mod video_url;

pub use ownership::fetch_owned_video;
pub use video_url::{resolve_video_url, resolve_video_urls};
