//! Movie entity and its write payload

use super::reference::{Genre, Language};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog movie with its language and genres loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    /// TMDB id; absent for manually created entries
    pub tmdb_id: Option<i64>,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    /// Free-form release date, usually `YYYY-MM-DD`
    pub release_date: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub adult: bool,
    pub language_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything a caller may set on a movie
///
/// Ids and timestamps are owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub tmdb_id: Option<i64>,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub adult: bool,
    pub language_id: Option<i64>,
    /// Internal genre row ids
    pub genre_ids: Vec<i64>,
}
