//! JWT-based authentication extractor for Axum handlers.

use crate::auth::jwt::{extract_bearer_token, validate_token};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use tubely_core::AppError;
use uuid::Uuid;

/// Authenticated caller extracted from a JWT Bearer token.
///
/// Implements `FromRequestParts`, so it can precede `Multipart` in a handler's arguments.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = validate_token(token, state.config.jwt_secret()).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
