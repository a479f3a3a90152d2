//! # Movie Catalog Core
//!
//! Shared building blocks for the movie catalog service.
//!
//! ## Modules
//!
//! - `config`: Configuration loading and validation
//! - `database`: PostgreSQL connection pool and embedded migrations
//! - `error`: Error type rendered as the API response envelope
//! - `health`: Liveness report
//! - `models`: Movies, lookups, sync logs and dashboard aggregates
//! - `observability`: Structured logging
//! - `pagination`: Page window coercion and metadata
//! - `query`: List filters, sort allow-list and date ranges
//! - `repository`: `CatalogStore` trait with PostgreSQL and in-memory backends
//! - `response`: Standard response envelope

pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod response;

pub use config::{
    load_dotenv, AppConfig, ConfigLoader, DatabaseConfig, ObjectStoreConfig, ServiceConfig,
    TmdbConfig,
};
pub use database::DatabasePool;
pub use error::CatalogError;
pub use health::{ComponentStatus, ServiceHealth};
pub use models::{
    ChartData, ColumnChartData, DashboardStats, Genre, Language, Movie, MovieRecord, NewSyncLog,
    PieChartData, SyncLog, SyncStatus,
};
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};
pub use pagination::{PageRequest, PaginationMeta, DEFAULT_LIMIT, MAX_LIMIT};
pub use query::{DateRange, MovieListQuery, MovieSortField, SortOrder};
pub use repository::{
    CatalogStore, InMemoryCatalogStore, MoviePage, PostgresCatalogStore, UpsertOutcome,
};
pub use response::{ApiResponse, ResponseStatus};

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
