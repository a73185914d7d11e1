use crate::error::HttpAppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

/// `{id}` path segment parsed as a UUID; rejects with a JSON `BAD_REQUEST`.
#[derive(Debug, Clone, Copy)]
pub struct VideoIdPath(pub Uuid);

impl<S> FromRequestParts<S> for VideoIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let id = Uuid::parse_str(&raw)
            .map_err(|_| AppError::BadRequest(format!("Invalid video ID: {}", raw)))?;

        Ok(VideoIdPath(id))
    }
}
