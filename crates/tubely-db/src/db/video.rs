use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Persistence for video metadata rows.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn create(&self, params: CreateVideoParams, user_id: Uuid) -> Result<Video, AppError>;

    /// Overwrite the mutable columns of `video` and bump `updated_at`.
    /// Returns `NotFound` if the row no longer exists.
    async fn update(&self, video: &Video) -> Result<Video, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Videos owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(video)
    }

    #[tracing::instrument(skip(self, params), fields(db.table = "videos", db.operation = "insert"))]
    async fn create(&self, params: CreateVideoParams, user_id: Uuid) -> Result<Video, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let video = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id)
            VALUES ($1, $2, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .bind(&params.title)
        .bind(&params.description)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(video_id = %video.id, "Video row created");
        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<Postgres, Video>(
            "SELECT * FROM videos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
