//! Movie Catalog Service - HTTP API
//!
//! Port: 8010 (default)

use anyhow::Context;
use movie_catalog_api::{AppState, Server};
use movie_catalog_core::config::{load_dotenv, AppConfig, ConfigLoader};
use movie_catalog_core::database::DatabasePool;
use movie_catalog_core::observability::{init_logging, LogConfig};
use movie_catalog_core::repository::{CatalogStore, PostgresCatalogStore};
use movie_catalog_ingestion::{MetadataSource, TmdbClient};
use movie_catalog_storage::{ObjectStore, S3ObjectStore, UploadService};
use std::sync::Arc;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_logging(&LogConfig::from(&config.service)).context("failed to initialize logging")?;
    config.validate().context("invalid configuration")?;

    for warning in config.warnings() {
        warn!(warning = %warning, "Configuration warning");
    }

    info!(
        environment = %config.service.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting movie catalog service"
    );

    let db = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to run migrations")?;
    info!("Database migrations applied");

    let store: Arc<dyn CatalogStore> = Arc::new(PostgresCatalogStore::new(
        db.pool().clone(),
        config.database.query_timeout,
    ));

    let uploads = match S3ObjectStore::new(&config.storage) {
        Ok(objects) => {
            if let Err(e) = objects.ensure_public_bucket().await {
                warn!(error = %e, "Failed to configure bucket, continuing");
            }
            let objects: Arc<dyn ObjectStore> = Arc::new(objects);
            Some(Arc::new(UploadService::new(
                objects,
                &config.storage.public_base_url(),
            )))
        }
        Err(e) => {
            warn!(error = %e, "Object storage unavailable; uploads and image cleanup disabled");
            None
        }
    };

    let source: Arc<dyn MetadataSource> =
        Arc::new(TmdbClient::new(&config.tmdb).context("failed to build TMDB client")?);

    let state = AppState::new(store, source, uploads);
    Server::new(config.service.clone(), state).run().await?;

    db.close().await;
    Ok(())
}
