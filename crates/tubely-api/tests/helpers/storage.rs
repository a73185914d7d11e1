//! Local storage wrapper that can be told to misbehave during an upload.

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::{LocalStorage, Storage, StorageBackend, StorageError, StorageResult};
use uuid::Uuid;

/// Fault applied to the next `put_file` calls.
#[derive(Debug, Clone, Copy)]
pub enum StorageFault {
    /// `put_file` fails without writing anything.
    UploadFails,
    /// `put_file` stores the object, then the record is deleted behind the pipeline's back.
    RecordDeletedDuringUpload(Uuid),
}

pub struct TestStorage {
    inner: LocalStorage,
    videos: Arc<InMemoryVideoRepository>,
    fault: Mutex<Option<StorageFault>>,
    stored_keys: Mutex<Vec<String>>,
}

impl TestStorage {
    pub fn new(inner: LocalStorage, videos: Arc<InMemoryVideoRepository>) -> Self {
        Self {
            inner,
            videos,
            fault: Mutex::new(None),
            stored_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn inject(&self, fault: StorageFault) {
        *self.fault.lock().unwrap() = Some(fault);
    }

    /// Keys successfully written through `put_file`, in order.
    pub fn stored_keys(&self) -> Vec<String> {
        self.stored_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for TestStorage {
    async fn put_file(
        &self,
        storage_key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<u64> {
        let fault = *self.fault.lock().unwrap();

        if let Some(StorageFault::UploadFails) = fault {
            return Err(StorageError::UploadFailed("connection reset by peer".to_string()));
        }

        let size = self.inner.put_file(storage_key, content_type, path).await?;
        self.stored_keys.lock().unwrap().push(storage_key.to_string());

        if let Some(StorageFault::RecordDeletedDuringUpload(video_id)) = fault {
            self.videos.delete(video_id).await.unwrap();
        }

        Ok(size)
    }

    async fn presigned_get(
        &self,
        bucket: &str,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.inner.presigned_get(bucket, storage_key, expires_in).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.inner.delete(storage_key).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    fn bucket(&self) -> &str {
        self.inner.bucket()
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
