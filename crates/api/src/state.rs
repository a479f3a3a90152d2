//! Shared application state

use crate::services::{DashboardService, MovieService};
use movie_catalog_core::repository::CatalogStore;
use movie_catalog_ingestion::{MetadataSource, SyncPipeline};
use movie_catalog_storage::{ImageCleanup, UploadService};
use std::sync::Arc;
use std::time::Duration;

/// Default bound on the `/health` database probe
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Services shared by every worker
pub struct AppState {
    pub movies: MovieService,
    pub dashboard: DashboardService,
    pub sync: SyncPipeline,
    /// `None` when object storage is not configured
    pub uploads: Option<Arc<UploadService>>,
    pub store: Arc<dyn CatalogStore>,
    pub health_timeout: Duration,
}

impl AppState {
    /// Wire services around one store; the upload service doubles as image cleanup
    pub fn new(
        store: Arc<dyn CatalogStore>,
        source: Arc<dyn MetadataSource>,
        uploads: Option<Arc<UploadService>>,
    ) -> Self {
        let images = uploads
            .clone()
            .map(|uploads| uploads as Arc<dyn ImageCleanup>);

        Self {
            movies: MovieService::new(store.clone(), images),
            dashboard: DashboardService::new(store.clone()),
            sync: SyncPipeline::new(store.clone(), source),
            uploads,
            store,
            health_timeout: HEALTH_PROBE_TIMEOUT,
        }
    }
}
