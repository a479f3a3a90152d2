//! Movie CRUD with lookup resolution and image cleanup

use movie_catalog_core::models::{Movie, MovieRecord};
use movie_catalog_core::pagination::PaginationMeta;
use movie_catalog_core::query::MovieListQuery;
use movie_catalog_core::repository::CatalogStore;
use movie_catalog_core::{CatalogError, Result};
use movie_catalog_ingestion::{genre_name, language_name};
use movie_catalog_storage::ImageCleanup;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Create/update payload
///
/// `original_language` is an ISO 639-1 code and `genre_ids` are TMDB genre
/// ids; both are resolved to lookup rows, created on first use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieInput {
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
    pub original_language: String,
    pub genre_ids: Vec<i32>,
}

pub struct MovieService {
    store: Arc<dyn CatalogStore>,
    images: Option<Arc<dyn ImageCleanup>>,
}

impl MovieService {
    /// `images` is `None` when object storage is not configured
    pub fn new(store: Arc<dyn CatalogStore>, images: Option<Arc<dyn ImageCleanup>>) -> Self {
        Self { store, images }
    }

    pub async fn list(&self, query: &MovieListQuery) -> Result<(Vec<Movie>, PaginationMeta)> {
        let page = self.store.list_movies(query).await?;
        let meta = PaginationMeta::new(&query.page, page.total);
        Ok((page.movies, meta))
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        self.store
            .find_movie(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a movie
    ///
    /// # Errors
    ///
    /// `Validation` for a blank title, `Conflict` when the TMDB id is taken.
    pub async fn create(&self, input: MovieInput) -> Result<Movie> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::validation("movie title is required"));
        }

        let tmdb_id = input.tmdb_id.filter(|id| *id > 0);
        if let Some(tmdb_id) = tmdb_id {
            if self.store.find_movie_by_tmdb_id(tmdb_id).await?.is_some() {
                return Err(CatalogError::Conflict(format!(
                    "movie with TMDB ID {} already exists",
                    tmdb_id
                )));
            }
        }

        let mut record = self.resolve(&input).await?;
        record.tmdb_id = tmdb_id;

        let movie = self.store.create_movie(&record).await?;
        info!(movie_id = movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    /// Replace a movie's writable fields
    ///
    /// The TMDB id cannot be changed. A replaced poster or backdrop that was
    /// uploaded to the bucket is deleted.
    pub async fn update(&self, id: i64, input: MovieInput) -> Result<Movie> {
        let existing = self.get(id).await?;

        if input.title.trim().is_empty() {
            return Err(CatalogError::validation("movie title is required"));
        }

        let mut record = self.resolve(&input).await?;
        record.tmdb_id = existing.tmdb_id;

        if !record.poster_path.is_empty() && record.poster_path != existing.poster_path {
            self.cleanup(&existing.poster_path).await;
        }
        if !record.backdrop_path.is_empty() && record.backdrop_path != existing.backdrop_path {
            self.cleanup(&existing.backdrop_path).await;
        }

        let movie = self.store.update_movie(id, &record).await?;
        info!(movie_id = id, "Movie updated");
        Ok(movie)
    }

    /// Delete a movie along with its uploaded images
    pub async fn delete(&self, id: i64) -> Result<()> {
        let existing = self.get(id).await?;

        self.cleanup(&existing.poster_path).await;
        self.cleanup(&existing.backdrop_path).await;

        self.store.delete_movie(id).await?;
        info!(movie_id = id, "Movie deleted");
        Ok(())
    }

    async fn resolve(&self, input: &MovieInput) -> Result<MovieRecord> {
        let code = input.original_language.trim();
        let language_id = if code.is_empty() {
            None
        } else {
            let language = self
                .store
                .find_or_create_language(code, &language_name(code))
                .await?;
            Some(language.id)
        };

        let mut genre_ids = Vec::with_capacity(input.genre_ids.len());
        for &tmdb_genre_id in &input.genre_ids {
            let genre = self
                .store
                .find_or_create_genre(tmdb_genre_id, &genre_name(tmdb_genre_id))
                .await?;
            if !genre_ids.contains(&genre.id) {
                genre_ids.push(genre.id);
            }
        }

        Ok(MovieRecord {
            tmdb_id: input.tmdb_id,
            title: input.title.trim().to_string(),
            original_title: input.original_title.clone(),
            overview: input.overview.clone(),
            release_date: input.release_date.clone(),
            poster_path: input.poster_path.clone(),
            backdrop_path: input.backdrop_path.clone(),
            vote_average: input.vote_average,
            vote_count: input.vote_count,
            popularity: input.popularity,
            adult: input.adult,
            language_id,
            genre_ids,
        })
    }

    /// Best-effort removal of an uploaded image
    async fn cleanup(&self, reference: &str) {
        let Some(images) = &self.images else {
            return;
        };
        if reference.is_empty() || !images.owns(reference) {
            return;
        }
        if let Err(e) = images.remove_image(reference).await {
            warn!(reference, error = %e, "Failed to delete image from object store");
        }
    }
}

fn not_found(id: i64) -> CatalogError {
    CatalogError::not_found(format!("movie with ID {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_catalog_core::pagination::PageRequest;
    use movie_catalog_core::repository::InMemoryCatalogStore;
    use movie_catalog_storage::{RecordingObjectStore, UploadService};

    const BUCKET_URL: &str = "http://localhost:9000/movies";

    fn service() -> (MovieService, Arc<RecordingObjectStore>) {
        let objects = Arc::new(RecordingObjectStore::new("movies"));
        let uploads = Arc::new(UploadService::new(objects.clone(), "http://localhost:9000"));
        let svc = MovieService::new(Arc::new(InMemoryCatalogStore::new()), Some(uploads));
        (svc, objects)
    }

    fn input(title: &str) -> MovieInput {
        MovieInput {
            title: title.to_string(),
            release_date: "2024-03-01".to_string(),
            original_language: "fr".to_string(),
            genre_ids: vec![18, 18, 10749],
            ..MovieInput::default()
        }
    }

    #[tokio::test]
    async fn test_create_resolves_lookups() {
        let (svc, _) = service();
        let movie = svc.create(input("  Anatomy of a Fall ")).await.unwrap();

        assert_eq!(movie.title, "Anatomy of a Fall");
        assert_eq!(movie.tmdb_id, None);
        assert_eq!(movie.language.as_ref().map(|l| l.name.as_str()), Some("French"));
        assert_eq!(movie.genres.len(), 2);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let (svc, _) = service();
        let err = svc.create(input(" ")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_tmdb_id() {
        let (svc, _) = service();
        let mut first = input("First");
        first.tmdb_id = Some(77);
        svc.create(first.clone()).await.unwrap();

        let err = svc.create(first).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_tmdb_id_and_cleans_replaced_poster() {
        let (svc, objects) = service();
        let mut original = input("Original");
        original.tmdb_id = Some(12);
        original.poster_path = format!("{}/old_1a2b3c4d.jpg", BUCKET_URL);
        original.backdrop_path = "/tmdb-backdrop.jpg".to_string();
        let created = svc.create(original).await.unwrap();

        let mut change = input("Renamed");
        change.tmdb_id = Some(999);
        change.poster_path = format!("{}/new_5e6f7a8b.jpg", BUCKET_URL);
        change.backdrop_path = "/other-backdrop.jpg".to_string();
        let updated = svc.update(created.id, change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.tmdb_id, Some(12));
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(objects.deleted_keys(), vec!["old_1a2b3c4d.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_movie() {
        let (svc, _) = service();
        let err = svc.update(404, input("Nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_uploaded_images_even_when_cleanup_fails() {
        let objects = Arc::new(RecordingObjectStore::new("movies").failing_deletes());
        let uploads = Arc::new(UploadService::new(objects.clone(), "http://localhost:9000"));
        let svc = MovieService::new(Arc::new(InMemoryCatalogStore::new()), Some(uploads));

        let mut movie = input("Doomed");
        movie.poster_path = format!("{}/p_00000000.jpg", BUCKET_URL);
        movie.backdrop_path = format!("{}/b_11111111.jpg", BUCKET_URL);
        let created = svc.create(movie).await.unwrap();

        svc.delete(created.id).await.unwrap();

        assert_eq!(objects.deleted_keys().len(), 2);
        assert!(matches!(
            svc.get(created.id).await.unwrap_err(),
            CatalogError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_builds_meta() {
        let (svc, _) = service();
        for title in ["A", "B", "C"] {
            svc.create(input(title)).await.unwrap();
        }

        let query = MovieListQuery {
            page: PageRequest::new(Some(2), Some(2)),
            ..MovieListQuery::default()
        };
        let (movies, meta) = svc.list(&query).await.unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(meta.total, 3);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
    }
}
