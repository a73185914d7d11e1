//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against the in-memory repository, local storage in a temp dir and
//! fake prober/optimizer, so no Docker, S3 or ffmpeg is needed.
#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tubely_api::auth::generate_access_token;
use tubely_api::setup::routes::setup_routes;
use tubely_api::AppState;
use tubely_core::{BaseConfig, Config, StorageBackend, VideoServiceConfig};
use tubely_db::InMemoryVideoRepository;
use tubely_processing::testing::{FakeOptimizer, FakeProber};
use tubely_storage::{LocalStorage, Storage};
use uuid::Uuid;

pub use storage::{StorageFault, TestStorage};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_BUCKET: &str = "tubely-test";
pub const PUBLIC_BASE_URL: &str = "http://localhost:8091";

/// Test application: server plus handles on every collaborator.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub storage: Arc<TestStorage>,
    pub prober: Arc<FakeProber>,
    pub optimizer: Arc<FakeOptimizer>,
    pub scratch_dir: PathBuf,
    pub assets_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently left in the scratch directory.
    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        dir_entries(&self.scratch_dir)
    }

    pub fn asset_entries(&self) -> Vec<PathBuf> {
        dir_entries(&self.assets_dir)
    }
}

fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default()
}

fn test_config(root: &Path) -> VideoServiceConfig {
    VideoServiceConfig {
        base: BaseConfig {
            server_port: 8091,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 5,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
        },
        database_url: "postgres://unused".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some(root.join("objects").display().to_string()),
        local_storage_base_url: Some(format!("{}/objects", PUBLIC_BASE_URL)),
        signed_url_expiry_secs: 3600,
        assets_root: root.join("assets"),
        public_base_url: PUBLIC_BASE_URL.to_string(),
        max_video_upload_bytes: 1 << 30,
        max_thumbnail_upload_bytes: 10 << 20,
        scratch_dir: root.join("scratch"),
        ffprobe_path: "ffprobe".to_string(),
        ffmpeg_path: "ffmpeg".to_string(),
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeProber::new(1920, 1080), FakeOptimizer::new(), |_| {}).await
}

/// Build a test app with the given fakes; `customize` may adjust the config.
pub async fn setup_test_app_with(
    prober: FakeProber,
    optimizer: FakeOptimizer,
    customize: impl FnOnce(&mut VideoServiceConfig),
) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut video_config = test_config(temp_dir.path());
    customize(&mut video_config);
    let config = Config(Box::new(video_config));

    std::fs::create_dir_all(config.scratch_dir()).unwrap();
    std::fs::create_dir_all(config.assets_root()).unwrap();

    let local = LocalStorage::new(
        temp_dir.path().join("objects"),
        format!("{}/objects", PUBLIC_BASE_URL),
        TEST_BUCKET.to_string(),
    )
    .await
    .unwrap();
    let videos = Arc::new(InMemoryVideoRepository::new());
    let storage = Arc::new(TestStorage::new(local, videos.clone()));
    let prober = Arc::new(prober);
    let optimizer = Arc::new(optimizer);

    let state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        videos: videos.clone(),
        storage: storage.clone(),
        prober: prober.clone(),
        optimizer: optimizer.clone(),
    });

    let router = setup_routes(&config, state.clone()).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        state,
        videos,
        storage,
        prober,
        optimizer,
        scratch_dir: config.scratch_dir().to_path_buf(),
        assets_dir: config.assets_root().to_path_buf(),
        _temp_dir: temp_dir,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, TEST_JWT_SECRET, Duration::from_secs(3600)).unwrap()
}

/// Create a video record over HTTP and return its id.
pub async fn create_video(app: &TestApp, user_id: Uuid, title: &str) -> Uuid {
    let response = app
        .client()
        .post("/videos")
        .authorization_bearer(token_for(user_id))
        .json(&serde_json::json!({ "title": title, "description": "test video" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().parse().unwrap()
}

pub fn video_form(content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "video",
        Part::bytes(b"\x00\x00\x00\x18ftypmp42 fake video bytes".to_vec())
            .file_name("clip.mp4")
            .mime_type(content_type),
    )
}

pub fn thumbnail_form(content_type: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(bytes)
            .file_name("thumb")
            .mime_type(content_type),
    )
}

/// Object key part of a persisted `bucket,key` descriptor.
pub fn descriptor_parts(descriptor: &str) -> (String, String) {
    let parts: Vec<&str> = descriptor.split(',').collect();
    assert_eq!(parts.len(), 2, "descriptor {:?} must have two parts", descriptor);
    assert!(!parts[0].is_empty() && !parts[1].is_empty());
    (parts[0].to_string(), parts[1].to_string())
}

pub async fn object_exists(app: &TestApp, key: &str) -> bool {
    app.storage.exists(key).await.unwrap()
}
