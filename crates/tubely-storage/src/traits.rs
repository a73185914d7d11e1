//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::UploadFailed(msg),
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::MalformedUrlDescriptor(msg),
            StorageError::SigningFailed(msg) => {
                AppError::Internal(format!("URL signing failed: {}", msg))
            }
            StorageError::DeleteFailed(msg)
            | StorageError::BackendError(msg)
            | StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(e) => AppError::Internal(format!("IO error: {}", e)),
        }
    }
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait so the
/// ingestion pipeline can stay unaware of where bytes end up.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream the file at `path` to `storage_key`, attaching `content_type` to the
    /// stored object. Returns the number of bytes written.
    async fn put_file(
        &self,
        storage_key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<u64>;

    /// Generate a time-limited GET URL for `storage_key` in `bucket`.
    async fn presigned_get(
        &self,
        bucket: &str,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Delete a file by its storage key. Deleting a missing key succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Bucket recorded in `bucket,key` descriptors for objects written by this backend.
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
