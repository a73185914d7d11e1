//! Application setup and initialization

pub mod database;
pub mod processing;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())?;
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    prepare_directories(&config).await?;

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let (prober, optimizer) = processing::setup_processing(&config)?;

    let state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        videos: Arc::new(PgVideoRepository::new(pool)),
        storage,
        prober,
        optimizer,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

async fn prepare_directories(config: &Config) -> Result<()> {
    for dir in [config.scratch_dir(), config.assets_root()] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}
