#![allow(dead_code)]

use movie_catalog_api::AppState;
use movie_catalog_core::repository::InMemoryCatalogStore;
use movie_catalog_ingestion::{MockMetadataSource, TmdbMovie};
use movie_catalog_storage::{RecordingObjectStore, UploadService};
use std::sync::Arc;

pub struct TestContext {
    pub store: Arc<InMemoryCatalogStore>,
    pub source: Arc<MockMetadataSource>,
    pub objects: Arc<RecordingObjectStore>,
}

impl TestContext {
    pub fn new(source: MockMetadataSource) -> Self {
        Self {
            store: Arc::new(InMemoryCatalogStore::new()),
            source: Arc::new(source),
            objects: Arc::new(RecordingObjectStore::new("movies")),
        }
    }

    pub fn state(&self) -> AppState {
        let uploads = Arc::new(UploadService::new(
            self.objects.clone(),
            "http://localhost:9000",
        ));
        AppState::new(self.store.clone(), self.source.clone(), Some(uploads))
    }
}

/// Build an actix test service around a [`TestContext`]
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state()))
                .wrap(movie_catalog_api::middleware::PanicRecoveryMiddleware)
                .wrap(movie_catalog_api::middleware::RequestIdMiddleware)
                .configure(movie_catalog_api::configure_app)
                .default_service(actix_web::web::to(movie_catalog_api::extractors::not_found)),
        )
        .await
    };
}

pub fn tmdb_movie(id: i64, title: &str, release_date: &str) -> TmdbMovie {
    TmdbMovie {
        id,
        title: title.to_string(),
        original_title: title.to_string(),
        release_date: release_date.to_string(),
        vote_average: 7.0,
        vote_count: 500,
        popularity: 50.0,
        original_language: "en".to_string(),
        genre_ids: vec![28],
        ..TmdbMovie::default()
    }
}
