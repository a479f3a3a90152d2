//! Catalog synchronization pipeline
//!
//! A run fetches popular-movie pages one after another and folds every
//! listing into the catalog:
//!
//! 1. resolve the original language (find-or-create, name from the static table)
//! 2. resolve each genre id (find-or-create, name from the static table)
//! 3. upsert the movie by TMDB id, counting inserts and updates
//!
//! Failures on a single listing are logged and skipped. A failed page fetch
//! ends the run. Every run leaves exactly one sync log behind.

use crate::reference::{genre_name, language_name};
use crate::tmdb::{MetadataSource, TmdbMovie};
use crate::IngestionError;
use chrono::Utc;
use movie_catalog_core::models::{MovieRecord, NewSyncLog, SyncLog, SyncStatus};
use movie_catalog_core::repository::CatalogStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Upper bound on pages fetched in one run
pub const MAX_SYNC_PAGES: u32 = 10;

/// Clamp a requested page count to `1..=MAX_SYNC_PAGES`
pub fn clamp_pages(requested: i64) -> u32 {
    requested.clamp(1, MAX_SYNC_PAGES as i64) as u32
}

/// A run aborted by a page fetch failure
///
/// The failed log has already been persisted when this is returned.
#[derive(Debug, thiserror::Error)]
#[error("{}", .log.error_message.as_deref().unwrap_or("sync failed"))]
pub struct SyncFailure {
    pub log: SyncLog,
    #[source]
    pub error: IngestionError,
}

#[derive(Debug, Default, Clone, Copy)]
struct SyncCounts {
    added: i32,
    updated: i32,
}

/// Sync pipeline from a metadata source into the catalog store
pub struct SyncPipeline {
    store: Arc<dyn CatalogStore>,
    source: Arc<dyn MetadataSource>,
}

impl SyncPipeline {
    pub fn new(store: Arc<dyn CatalogStore>, source: Arc<dyn MetadataSource>) -> Self {
        Self { store, source }
    }

    /// Run one manual sync over `requested_pages` pages (clamped to 1..=10)
    ///
    /// # Errors
    ///
    /// Returns [`SyncFailure`] carrying the persisted `failed` log when a page
    /// cannot be fetched. Remaining pages are not requested.
    pub async fn run(&self, requested_pages: i64) -> Result<SyncLog, SyncFailure> {
        let pages = clamp_pages(requested_pages);
        let mut log = NewSyncLog::manual(Utc::now());
        let mut counts = SyncCounts::default();

        info!(pages, "Starting TMDB sync");

        for page in 1..=pages {
            info!(page, "Fetching TMDB popular movies");

            let listing = match self.source.popular_movies(page).await {
                Ok(listing) => listing,
                Err(err) => {
                    log.movies_added = counts.added;
                    log.movies_updated = counts.updated;
                    log.error_message = Some(format!("failed to fetch page {}: {}", page, err));
                    error!(page, error = %err, "TMDB sync aborted");

                    let log = self.persist_log(log).await;
                    return Err(SyncFailure { log, error: err });
                }
            };

            for item in &listing.results {
                self.sync_item(item, &mut counts).await;
            }
        }

        log.status = SyncStatus::Success;
        log.movies_added = counts.added;
        log.movies_updated = counts.updated;

        info!(
            movies_added = counts.added,
            movies_updated = counts.updated,
            "Sync completed"
        );

        Ok(self.persist_log(log).await)
    }

    async fn sync_item(&self, item: &TmdbMovie, counts: &mut SyncCounts) {
        if item.id <= 0 {
            warn!(title = %item.title, "Skipping TMDB listing without an id");
            return;
        }

        let language_id = if item.original_language.is_empty() {
            None
        } else {
            let code = item.original_language.as_str();
            match self
                .store
                .find_or_create_language(code, &language_name(code))
                .await
            {
                Ok(language) => Some(language.id),
                Err(e) => {
                    error!(lang_code = %code, error = %e, "Error creating language");
                    return;
                }
            }
        };

        let mut genre_ids = Vec::with_capacity(item.genre_ids.len());
        for &tmdb_genre_id in &item.genre_ids {
            match self
                .store
                .find_or_create_genre(tmdb_genre_id, &genre_name(tmdb_genre_id))
                .await
            {
                Ok(genre) => genre_ids.push(genre.id),
                Err(e) => {
                    warn!(genre_id = tmdb_genre_id, error = %e, "Error creating genre");
                }
            }
        }

        let record = MovieRecord {
            tmdb_id: Some(item.id),
            title: item.title.clone(),
            original_title: item.original_title.clone(),
            overview: item.overview.clone(),
            release_date: item.release_date.clone(),
            poster_path: item.poster_path.clone(),
            backdrop_path: item.backdrop_path.clone(),
            vote_average: item.vote_average,
            vote_count: item.vote_count,
            popularity: item.popularity,
            adult: item.adult,
            language_id,
            genre_ids,
        };

        match self.store.upsert_movie(&record).await {
            Ok(outcome) if outcome.created => counts.added += 1,
            Ok(_) => counts.updated += 1,
            Err(e) => {
                error!(tmdb_id = item.id, title = %item.title, error = %e, "Error saving movie");
            }
        }
    }

    /// Persist the run log, falling back to the unsaved log on failure
    async fn persist_log(&self, log: NewSyncLog) -> SyncLog {
        match self.store.create_sync_log(&log).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, "Failed to persist sync log");
                log.into_unsaved()
            }
        }
    }
}
