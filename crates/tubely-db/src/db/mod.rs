//! Database repositories for data access layer

mod video;

#[cfg(any(test, feature = "test-helpers"))]
mod memory;

pub use video::{PgVideoRepository, VideoRepository};

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryVideoRepository;

use sqlx::PgPool;
use tubely_core::AppError;

/// Apply the workspace migrations embedded at build time.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run database migrations: {}", e)))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
