use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load a video the caller may modify: missing is `NotFound`, someone else's is `Forbidden`.
pub async fn fetch_owned_video(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user_id,
            owner_id = %video.user_id,
            "Rejected access to video owned by another user"
        );
        return Err(AppError::Forbidden(
            "You are not the owner of this video".to_string(),
        ));
    }

    Ok(video)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::models::CreateVideoParams;
    use tubely_db::InMemoryVideoRepository;

    #[tokio::test]
    async fn test_missing_and_foreign_videos_are_distinct() {
        let repo = InMemoryVideoRepository::new();
        let owner = Uuid::new_v4();
        let video = repo
            .create(
                CreateVideoParams {
                    title: "mine".to_string(),
                    description: String::new(),
                },
                owner,
            )
            .await
            .unwrap();

        assert!(fetch_owned_video(&repo, video.id, owner).await.is_ok());
        assert!(matches!(
            fetch_owned_video(&repo, video.id, Uuid::new_v4()).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            fetch_owned_video(&repo, Uuid::new_v4(), owner).await,
            Err(AppError::NotFound(_))
        ));
    }
}
