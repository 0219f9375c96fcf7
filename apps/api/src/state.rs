use std::sync::Arc;

use crate::blobs::BlobStore;
use crate::config::Config;
use crate::store::JobBoardStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobBoardStore>,
    /// Resume uploads land here; S3 with the Postgres backend, in memory otherwise.
    pub blobs: Arc<dyn BlobStore>,
    pub config: Config,
}
