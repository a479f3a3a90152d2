//! Movie Catalog Ingestion
//!
//! Pulls popular-movie listings from TMDB and folds them into the catalog:
//! a thin HTTP client, static lookup tables for language and genre names, and
//! the sync pipeline that upserts each listing by its TMDB id.

pub mod pipeline;
pub mod reference;
pub mod tmdb;

pub use pipeline::{clamp_pages, SyncFailure, SyncPipeline, MAX_SYNC_PAGES};
pub use reference::{genre_name, language_name};
pub use tmdb::{MetadataSource, MockMetadataSource, TmdbClient, TmdbMovie, TmdbPage};

use movie_catalog_core::CatalogError;

/// Common error type for the ingestion pipeline
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("TMDB API returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("failed to decode TMDB response: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<IngestionError> for CatalogError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::Store(inner) => inner,
            IngestionError::ConfigError(message) => CatalogError::ConfigurationError {
                message,
                key: None,
            },
            other => CatalogError::Upstream(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestionError>;
