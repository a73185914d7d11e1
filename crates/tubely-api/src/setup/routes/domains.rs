//! Video route group.

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tubely_core::Config;

pub fn video_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/videos",
            post(handlers::video_meta::create_video).get(handlers::video_meta::list_videos),
        )
        .route(
            "/videos/{id}",
            get(handlers::video_meta::get_video).delete(handlers::video_meta::delete_video),
        )
        .route(
            "/videos/{id}/upload",
            post(handlers::video_upload::upload_video)
                .layer(DefaultBodyLimit::max(config.max_video_upload_bytes())),
        )
        .route(
            "/videos/{id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(config.max_thumbnail_upload_bytes())),
        )
}
