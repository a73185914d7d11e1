//! Tubely Storage Library
//!
//! Object storage abstraction plus S3 and local filesystem implementations.
//!
//! # Storage key format
//!
//! Video objects are stored under `{orientation}/{random-id}.{extension}`, where the
//! random id is 32 random bytes encoded as URL-safe base64 without padding. Key
//! generation lives in the `keys` module so every backend agrees on the layout.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{random_object_id, video_object_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
