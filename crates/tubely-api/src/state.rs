//! Application state shared by all handlers

use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{MediaProber, StreamingOptimizer};
use tubely_storage::Storage;

/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub prober: Arc<dyn MediaProber>,
    pub optimizer: Arc<dyn StreamingOptimizer>,
}
