//! TMDb (The Movie Database) API client
//!
//! Only the popular-movies listing is used. Each page holds up to 20 movies.

use crate::{IngestionError, Result};
use async_trait::async_trait;
use movie_catalog_core::config::TmdbConfig;
use movie_catalog_core::observability::external_api_span;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, Instrument};

/// Treat JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a TMDB movie listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub poster_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backdrop_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i32>,
}

/// One page of the popular-movies listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Source of paginated movie listings
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch one page (1-based) of popular movies
    async fn popular_movies(&self, page: u32) -> Result<TmdbPage>;
}

/// TMDb API client
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a client with the configured base URL and request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &TmdbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("movie-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn popular_movies(&self, page: u32) -> Result<TmdbPage> {
        let url = format!("{}/movie/popular", self.base_url);
        let span = external_api_span("GET", &url, "tmdb");
        let page_param = page.to_string();

        async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("page", page_param.as_str()),
                    ("language", "en-US"),
                ])
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(IngestionError::UpstreamStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: TmdbPage = serde_json::from_str(&body)?;
            debug!(
                page,
                results = parsed.results.len(),
                total_pages = parsed.total_pages,
                "Fetched TMDB popular movies"
            );
            Ok(parsed)
        }
        .instrument(span)
        .await
    }
}

/// Scripted metadata source for tests
///
/// Serves configured pages, fails on pages marked with
/// [`MockMetadataSource::fail_on_page`], and returns an empty page otherwise.
#[derive(Default)]
pub struct MockMetadataSource {
    pages: HashMap<u32, TmdbPage>,
    failing: HashMap<u32, (u16, String)>,
    requested: Mutex<Vec<u32>>,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `results` as page `page`
    pub fn with_page(mut self, page: u32, results: Vec<TmdbMovie>) -> Self {
        let total_results = results.len() as u64;
        self.pages.insert(
            page,
            TmdbPage {
                page,
                results,
                total_pages: page,
                total_results,
            },
        );
        self
    }

    /// Answer page `page` with an upstream error
    pub fn fail_on_page(mut self, page: u32, status: u16, body: impl Into<String>) -> Self {
        self.failing.insert(page, (status, body.into()));
        self
    }

    /// Pages requested so far, in order
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested
            .lock()
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn popular_movies(&self, page: u32) -> Result<TmdbPage> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(page);
        }

        if let Some((status, body)) = self.failing.get(&page) {
            return Err(IngestionError::UpstreamStatus {
                status: *status,
                body: body.clone(),
            });
        }

        Ok(self.pages.get(&page).cloned().unwrap_or(TmdbPage {
            page,
            ..TmdbPage::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_with_nulls() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 550,
                "title": "Fight Club",
                "original_title": "Fight Club",
                "overview": null,
                "release_date": "1999-10-15",
                "poster_path": null,
                "vote_average": 8.4,
                "vote_count": 26280,
                "popularity": 61.416,
                "adult": false,
                "original_language": "en",
                "genre_ids": [18, 53]
            }],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let page: TmdbPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 500);
        let movie = &page.results[0];
        assert_eq!(movie.id, 550);
        assert_eq!(movie.overview, "");
        assert_eq!(movie.poster_path, "");
        assert_eq!(movie.backdrop_path, "");
        assert_eq!(movie.genre_ids, vec![18, 53]);
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = TmdbConfig {
            api_key: "key".to_string(),
            base_url: "http://localhost:1234/3/".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/3");
    }

    #[test]
    fn test_mock_source_records_requests() {
        let source = MockMetadataSource::new()
            .with_page(1, vec![TmdbMovie::default()])
            .fail_on_page(2, 503, "unavailable");

        let first = tokio_test::block_on(source.popular_movies(1)).unwrap();
        assert_eq!(first.results.len(), 1);
        assert!(tokio_test::block_on(source.popular_movies(2)).is_err());
        let third = tokio_test::block_on(source.popular_movies(3)).unwrap();
        assert!(third.results.is_empty());
        assert_eq!(source.requested_pages(), vec![1, 2, 3]);
    }
}
