//! Catalog persistence
//!
//! [`CatalogStore`] is the single seam between services and storage. The
//! PostgreSQL implementation backs the running service; the in-memory one is
//! used by tests and local experiments.

mod memory;
mod postgres;

pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

use crate::models::{
    ColumnChartData, DashboardStats, Genre, Language, Movie, MovieRecord, NewSyncLog,
    PieChartData, SyncLog,
};
use crate::query::{DateRange, MovieListQuery};
use crate::Result;
use async_trait::async_trait;

/// Number of movies in each dashboard top list
pub const DASHBOARD_LIST_SIZE: i64 = 10;

/// Minimum vote count for the top-rated list
pub const TOP_RATED_MIN_VOTES: i64 = 100;

/// Number of buckets returned by the language and year charts
pub const CHART_BUCKETS: i64 = 10;

/// One page of movies plus the size of the full result set
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: i64,
}

/// Result of an upsert by TMDB id
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    pub movie: Movie,
    /// `true` when a new row was inserted
    pub created: bool,
}

/// Persistence operations for movies, lookups, sync logs and aggregates
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a new movie
    ///
    /// Fails with `Conflict` if the TMDB id is already taken.
    async fn create_movie(&self, record: &MovieRecord) -> Result<Movie>;

    /// Overwrite every writable field of an existing movie
    ///
    /// The internal id and `created_at` are preserved. Fails with `NotFound`
    /// if the movie does not exist.
    async fn update_movie(&self, id: i64, record: &MovieRecord) -> Result<Movie>;

    /// Remove a movie and its genre links
    async fn delete_movie(&self, id: i64) -> Result<()>;

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>>;

    async fn find_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<Movie>>;

    /// Insert or update by TMDB id in a single conditional write
    ///
    /// The record must carry a TMDB id. An existing row keeps its internal id
    /// and `created_at`; every other field, genre links included, is replaced.
    async fn upsert_movie(&self, record: &MovieRecord) -> Result<UpsertOutcome>;

    /// Filter, sort and paginate movies
    async fn list_movies(&self, query: &MovieListQuery) -> Result<MoviePage>;

    async fn find_language_by_code(&self, code: &str) -> Result<Option<Language>>;

    /// Return the language with `code`, creating it with `name` if absent
    async fn find_or_create_language(&self, code: &str, name: &str) -> Result<Language>;

    /// Return the genre with `tmdb_id`, creating it with `name` if absent
    async fn find_or_create_genre(&self, tmdb_id: i32, name: &str) -> Result<Genre>;

    async fn create_sync_log(&self, log: &NewSyncLog) -> Result<SyncLog>;

    /// Most recent sync log by `synced_at`
    async fn last_sync_log(&self) -> Result<Option<SyncLog>>;

    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    /// Movie counts per language, largest first
    async fn movies_by_language(&self) -> Result<Vec<PieChartData>>;

    /// Movie counts per release year, largest first
    async fn movies_by_year(&self, range: &DateRange) -> Result<Vec<ColumnChartData>>;

    /// Twelve monthly buckets for `year`, zero-filled
    async fn movies_by_month(&self, year: i32) -> Result<Vec<ColumnChartData>>;

    /// Cheap connectivity probe
    async fn ping(&self) -> Result<()>;
}
