//! List and chart query parameters
//!
//! Sort fields are restricted to an allow-list so that the column name can be
//! spliced into SQL safely; anything unrecognized falls back to a default
//! rather than failing the request.

use crate::pagination::PageRequest;
use serde::{Deserialize, Serialize};

/// Sortable movie columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSortField {
    Id,
    Title,
    ReleaseDate,
    VoteAverage,
    Popularity,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl MovieSortField {
    /// Parse a sort field, falling back to `updated_at` for unknown input
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("id") => Self::Id,
            Some("title") => Self::Title,
            Some("release_date") => Self::ReleaseDate,
            Some("vote_average") => Self::VoteAverage,
            Some("popularity") => Self::Popularity,
            Some("created_at") => Self::CreatedAt,
            Some("updated_at") => Self::UpdatedAt,
            _ => Self::default(),
        }
    }

    /// Column name in the `movies` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::ReleaseDate => "release_date",
            Self::VoteAverage => "vote_average",
            Self::Popularity => "popularity",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any casing is ascending; everything else is descending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Inclusive release-date window, compared as strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Build a range, treating blank bounds as absent
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            start: non_blank(start),
            end: non_blank(end),
        }
    }

    pub fn contains(&self, release_date: &str) -> bool {
        let after_start = self
            .start
            .as_deref()
            .map_or(true, |start| release_date >= start);
        let before_end = self.end.as_deref().map_or(true, |end| release_date <= end);
        after_start && before_end
    }
}

/// Fully normalized movie list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieListQuery {
    pub page: PageRequest,
    /// Case-insensitive substring over title, overview and original title
    pub search: Option<String>,
    pub release_dates: DateRange,
    pub sort_by: MovieSortField,
    pub order: SortOrder,
}

impl MovieListQuery {
    /// Normalized search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
