//! Scratch files for in-flight uploads

use crate::utils::upload::multipart_error;
use axum::extract::multipart::Field;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

/// Deletes the file at `path` when dropped, unless [`ScratchPath::keep`] was called.
#[derive(Debug)]
pub struct ScratchPath {
    path: PathBuf,
    armed: bool,
}

impl ScratchPath {
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarm the guard and hand back the path.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for ScratchPath {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Scratch file removed");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove scratch file"
                );
            }
        }
    }
}

/// Stream a multipart field into `file`, then flush and fsync. Returns the byte count.
pub async fn write_field(
    field: &mut Field<'_>,
    file: &mut tokio::fs::File,
) -> Result<u64, AppError> {
    let mut size: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write upload: {}", e)))?;
        size += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to flush upload: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to sync upload: {}", e)))?;

    Ok(size)
}

/// Stage a multipart field into a fresh temp file under `scratch_dir`.
/// The file is deleted when the returned handle is dropped.
pub async fn stage_field(
    mut field: Field<'_>,
    scratch_dir: &Path,
    suffix: &str,
) -> Result<NamedTempFile, AppError> {
    let start = std::time::Instant::now();

    let staged = tempfile::Builder::new()
        .prefix("tubely-upload-")
        .suffix(suffix)
        .tempfile_in(scratch_dir)
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create scratch file in {}: {}",
                scratch_dir.display(),
                e
            ))
        })?;

    let handle = staged
        .as_file()
        .try_clone()
        .map_err(|e| AppError::Internal(format!("Failed to open scratch file: {}", e)))?;
    let mut file = tokio::fs::File::from_std(handle);

    let size = write_field(&mut field, &mut file).await?;

    tracing::debug!(
        path = %staged.path().display(),
        size_bytes = size,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Upload staged"
    );

    Ok(staged)
}
