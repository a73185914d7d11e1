use super::VideoRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// `VideoRepository` over a `HashMap`, for tests that do not need Postgres.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as-is, e.g. one carrying a preexisting `video_url`.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn create(&self, params: CreateVideoParams, user_id: Uuid) -> Result<Video, AppError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: params.title,
            description: params.description,
            thumbnail_url: None,
            video_url: None,
            user_id,
        };
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let existing = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?;

        existing.title = video.title.clone();
        existing.description = video.description.clone();
        existing.thumbnail_url = video.thumbnail_url.clone();
        existing.video_url = video.video_url.clone();
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.videos.write().await.remove(&id).is_some())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut owned: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(title: &str) -> CreateVideoParams {
        CreateVideoParams {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let video = repo.create(params("a"), Uuid::new_v4()).await.unwrap();
        assert!(repo.delete(video.id).await.unwrap());

        let result = repo.update(&video).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(!repo.delete(video.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let repo = InMemoryVideoRepository::new();
        let owner = Uuid::new_v4();
        let first = repo.create(params("first"), owner).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create(params("second"), owner).await.unwrap();
        repo.create(params("someone else"), Uuid::new_v4())
            .await
            .unwrap();

        let listed = repo.list_by_owner(owner).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
