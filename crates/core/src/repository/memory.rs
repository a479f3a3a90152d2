//! In-memory catalog store
//!
//! Mirrors the PostgreSQL semantics closely enough for service and route
//! tests: unique TMDB ids, find-or-create lookups, upsert identity
//! preservation, and the same filtering, ordering and chart rules.

use super::{
    CatalogStore, MoviePage, UpsertOutcome, CHART_BUCKETS, DASHBOARD_LIST_SIZE,
    TOP_RATED_MIN_VOTES,
};
use crate::error::CatalogError;
use crate::models::{
    monthly_series, ColumnChartData, DashboardStats, Genre, Language, Movie, MovieRecord,
    NewSyncLog, PieChartData, SyncLog,
};
use crate::query::{DateRange, MovieListQuery, MovieSortField, SortOrder};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredMovie {
    id: i64,
    record: MovieRecord,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    movies: BTreeMap<i64, StoredMovie>,
    languages: Vec<Language>,
    genres: Vec<Genre>,
    sync_logs: Vec<SyncLog>,
    next_movie_id: i64,
    next_language_id: i64,
    next_genre_id: i64,
    next_sync_log_id: i64,
}

impl State {
    fn hydrate(&self, stored: &StoredMovie) -> Movie {
        let record = &stored.record;
        let language = record
            .language_id
            .and_then(|id| self.languages.iter().find(|l| l.id == id).cloned());
        let mut genres: Vec<Genre> = self
            .genres
            .iter()
            .filter(|g| record.genre_ids.contains(&g.id))
            .cloned()
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));

        Movie {
            id: stored.id,
            tmdb_id: record.tmdb_id,
            title: record.title.clone(),
            original_title: record.original_title.clone(),
            overview: record.overview.clone(),
            release_date: record.release_date.clone(),
            poster_path: record.poster_path.clone(),
            backdrop_path: record.backdrop_path.clone(),
            vote_average: record.vote_average,
            vote_count: record.vote_count,
            popularity: record.popularity,
            adult: record.adult,
            language_id: record.language_id,
            language,
            genres,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    fn tmdb_id_taken(&self, tmdb_id: Option<i64>, except: Option<i64>) -> bool {
        tmdb_id.map_or(false, |tmdb_id| {
            self.movies
                .values()
                .any(|m| m.record.tmdb_id == Some(tmdb_id) && Some(m.id) != except)
        })
    }

    fn insert(&mut self, record: &MovieRecord) -> i64 {
        self.next_movie_id += 1;
        let now = Utc::now();
        let id = self.next_movie_id;
        self.movies.insert(
            id,
            StoredMovie {
                id,
                record: record.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    fn sorted_movies<F>(&self, mut compare: F) -> Vec<Movie>
    where
        F: FnMut(&StoredMovie, &StoredMovie) -> Ordering,
    {
        let mut stored: Vec<&StoredMovie> = self.movies.values().collect();
        stored.sort_by(|a, b| compare(a, b));
        stored.into_iter().map(|m| self.hydrate(m)).collect()
    }
}

fn compare_by(field: MovieSortField, a: &StoredMovie, b: &StoredMovie) -> Ordering {
    match field {
        MovieSortField::Id => a.id.cmp(&b.id),
        MovieSortField::Title => a.record.title.cmp(&b.record.title),
        MovieSortField::ReleaseDate => a.record.release_date.cmp(&b.record.release_date),
        MovieSortField::VoteAverage => a.record.vote_average.total_cmp(&b.record.vote_average),
        MovieSortField::Popularity => a.record.popularity.total_cmp(&b.record.popularity),
        MovieSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        MovieSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

fn matches_search(record: &MovieRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    [&record.title, &record.overview, &record.original_title]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// In-memory [`CatalogStore`]
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: RwLock<State>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies
    pub async fn movie_count(&self) -> usize {
        self.state.read().await.movies.len()
    }

    /// All sync logs in insertion order
    pub async fn sync_logs(&self) -> Vec<SyncLog> {
        self.state.read().await.sync_logs.clone()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn create_movie(&self, record: &MovieRecord) -> Result<Movie> {
        let mut state = self.state.write().await;
        if state.tmdb_id_taken(record.tmdb_id, None) {
            return Err(CatalogError::Conflict(format!(
                "movie with TMDB ID {} already exists",
                record.tmdb_id.unwrap_or_default()
            )));
        }

        let id = state.insert(record);
        Ok(state.hydrate(&state.movies[&id]))
    }

    async fn update_movie(&self, id: i64, record: &MovieRecord) -> Result<Movie> {
        let mut state = self.state.write().await;
        if !state.movies.contains_key(&id) {
            return Err(CatalogError::NotFound(format!("Movie {} not found", id)));
        }
        if state.tmdb_id_taken(record.tmdb_id, Some(id)) {
            return Err(CatalogError::Conflict(format!(
                "movie with TMDB ID {} already exists",
                record.tmdb_id.unwrap_or_default()
            )));
        }

        let stored = state
            .movies
            .get_mut(&id)
            .ok_or_else(|| CatalogError::NotFound(format!("Movie {} not found", id)))?;
        stored.record = record.clone();
        stored.updated_at = Utc::now();

        Ok(state.hydrate(&state.movies[&id]))
    }

    async fn delete_movie(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .movies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(format!("Movie {} not found", id)))
    }

    async fn find_movie(&self, id: i64) -> Result<Option<Movie>> {
        let state = self.state.read().await;
        Ok(state.movies.get(&id).map(|m| state.hydrate(m)))
    }

    async fn find_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<Movie>> {
        let state = self.state.read().await;
        Ok(state
            .movies
            .values()
            .find(|m| m.record.tmdb_id == Some(tmdb_id))
            .map(|m| state.hydrate(m)))
    }

    async fn upsert_movie(&self, record: &MovieRecord) -> Result<UpsertOutcome> {
        let tmdb_id = record.tmdb_id.ok_or_else(|| {
            CatalogError::Validation("upsert requires a TMDB id".to_string())
        })?;

        let mut state = self.state.write().await;
        let existing = state
            .movies
            .values()
            .find(|m| m.record.tmdb_id == Some(tmdb_id))
            .map(|m| m.id);

        let (id, created) = match existing {
            Some(id) => {
                if let Some(stored) = state.movies.get_mut(&id) {
                    stored.record = record.clone();
                    stored.updated_at = Utc::now();
                }
                (id, false)
            }
            None => (state.insert(record), true),
        };

        let movie = state.hydrate(&state.movies[&id]);
        Ok(UpsertOutcome { movie, created })
    }

    async fn list_movies(&self, query: &MovieListQuery) -> Result<MoviePage> {
        let state = self.state.read().await;

        let mut matching: Vec<&StoredMovie> = state
            .movies
            .values()
            .filter(|m| {
                query
                    .search_term()
                    .map_or(true, |term| matches_search(&m.record, term))
            })
            .filter(|m| query.release_dates.contains(&m.record.release_date))
            .collect();

        let total = matching.len() as i64;

        matching.sort_by(|a, b| {
            let ordering = compare_by(query.sort_by, a, b).then_with(|| a.id.cmp(&b.id));
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let movies = matching
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(query.page.limit as usize)
            .map(|m| state.hydrate(m))
            .collect();

        Ok(MoviePage { movies, total })
    }

    async fn find_language_by_code(&self, code: &str) -> Result<Option<Language>> {
        let state = self.state.read().await;
        Ok(state.languages.iter().find(|l| l.code == code).cloned())
    }

    async fn find_or_create_language(&self, code: &str, name: &str) -> Result<Language> {
        let mut state = self.state.write().await;
        if let Some(language) = state.languages.iter().find(|l| l.code == code) {
            return Ok(language.clone());
        }

        state.next_language_id += 1;
        let now = Utc::now();
        let language = Language {
            id: state.next_language_id,
            code: code.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.languages.push(language.clone());
        Ok(language)
    }

    async fn find_or_create_genre(&self, tmdb_id: i32, name: &str) -> Result<Genre> {
        let mut state = self.state.write().await;
        if let Some(genre) = state.genres.iter().find(|g| g.tmdb_id == tmdb_id) {
            return Ok(genre.clone());
        }

        state.next_genre_id += 1;
        let now = Utc::now();
        let genre = Genre {
            id: state.next_genre_id,
            tmdb_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.genres.push(genre.clone());
        Ok(genre)
    }

    async fn create_sync_log(&self, log: &NewSyncLog) -> Result<SyncLog> {
        let mut state = self.state.write().await;
        state.next_sync_log_id += 1;

        let saved = SyncLog {
            id: state.next_sync_log_id,
            created_at: Utc::now(),
            ..log.clone().into_unsaved()
        };
        state.sync_logs.push(saved.clone());
        Ok(saved)
    }

    async fn last_sync_log(&self) -> Result<Option<SyncLog>> {
        let state = self.state.read().await;
        Ok(state
            .sync_logs
            .iter()
            .max_by(|a, b| a.synced_at.cmp(&b.synced_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let state = self.state.read().await;
        let total_movies = state.movies.len() as i64;

        let (average_rating, total_votes) = if total_movies > 0 {
            let sum: f64 = state.movies.values().map(|m| m.record.vote_average).sum();
            let votes: i64 = state.movies.values().map(|m| m.record.vote_count).sum();
            (sum / total_movies as f64, votes)
        } else {
            (0.0, 0)
        };

        let last_sync_time = state.sync_logs.iter().map(|l| l.synced_at).max();
        let limit = DASHBOARD_LIST_SIZE as usize;

        let top_rated_movies = state
            .sorted_movies(|a, b| {
                b.record
                    .vote_average
                    .total_cmp(&a.record.vote_average)
                    .then(b.record.vote_count.cmp(&a.record.vote_count))
            })
            .into_iter()
            .filter(|m| m.vote_count > TOP_RATED_MIN_VOTES)
            .take(limit)
            .collect();
        let most_popular = state
            .sorted_movies(|a, b| b.record.popularity.total_cmp(&a.record.popularity))
            .into_iter()
            .take(limit)
            .collect();
        let recently_added = state
            .sorted_movies(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            .into_iter()
            .take(limit)
            .collect();

        Ok(DashboardStats {
            total_movies,
            average_rating,
            total_votes,
            last_sync_time,
            top_rated_movies,
            most_popular,
            recently_added,
        })
    }

    async fn movies_by_language(&self) -> Result<Vec<PieChartData>> {
        let state = self.state.read().await;
        let mut counts: HashMap<(String, String), i64> = HashMap::new();

        for movie in state.movies.values() {
            let key = movie
                .record
                .language_id
                .and_then(|id| state.languages.iter().find(|l| l.id == id))
                .map(|l| (l.name.clone(), l.code.clone()))
                .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string()));
            *counts.entry(key).or_default() += 1;
        }

        let mut data: Vec<PieChartData> = counts
            .into_iter()
            .map(|((label, code), value)| PieChartData { label, value, code })
            .collect();
        data.sort_by(|a, b| b.value.cmp(&a.value).then(a.label.cmp(&b.label)));
        data.truncate(CHART_BUCKETS as usize);
        Ok(data)
    }

    async fn movies_by_year(&self, range: &DateRange) -> Result<Vec<ColumnChartData>> {
        let state = self.state.read().await;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();

        for movie in state.movies.values() {
            let date = &movie.record.release_date;
            if !range.contains(date) {
                continue;
            }
            if let Some(year) = date.get(..4) {
                *counts.entry(year.to_string()).or_default() += 1;
            }
        }

        let mut data: Vec<ColumnChartData> = counts
            .into_iter()
            .map(|(label, value)| ColumnChartData { label, value })
            .collect();
        data.sort_by(|a, b| b.value.cmp(&a.value).then(b.label.cmp(&a.label)));
        data.truncate(CHART_BUCKETS as usize);
        Ok(data)
    }

    async fn movies_by_month(&self, year: i32) -> Result<Vec<ColumnChartData>> {
        let state = self.state.read().await;
        let prefix = format!("{:04}-", year);

        let counts: Vec<(u32, i64)> = state
            .movies
            .values()
            .filter_map(|m| {
                let date = &m.record.release_date;
                if !date.starts_with(&prefix) {
                    return None;
                }
                date.get(5..7)?.parse::<u32>().ok().map(|month| (month, 1))
            })
            .collect();

        Ok(monthly_series(&counts))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
