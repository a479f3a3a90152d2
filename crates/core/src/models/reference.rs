//! Lookup entities referenced by movies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spoken language, keyed by ISO 639-1 code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Movie genre, keyed by its TMDB genre id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: i64,
    pub tmdb_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
