use movie_catalog_core::config::TmdbConfig;
use movie_catalog_ingestion::{IngestionError, MetadataSource, TmdbClient};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    let config = TmdbConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/3", server.uri()),
        http_timeout: Duration::from_secs(5),
    };
    TmdbClient::new(&config).unwrap()
}

/// Popular movies are requested with key, page and language parameters
#[tokio::test]
async fn test_popular_movies_success() {
    let mock_server = MockServer::start().await;

    let response_body = serde_json::json!({
        "page": 2,
        "results": [
            {
                "id": 603,
                "title": "The Matrix",
                "original_title": "The Matrix",
                "overview": "A hacker learns the truth.",
                "release_date": "1999-03-30",
                "poster_path": "/matrix.jpg",
                "backdrop_path": null,
                "vote_average": 8.2,
                "vote_count": 24000,
                "popularity": 80.5,
                "adult": false,
                "original_language": "en",
                "genre_ids": [28, 878]
            }
        ],
        "total_pages": 500,
        "total_results": 10000
    });

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("page", "2"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.popular_movies(2).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.results.len(), 1);
    let movie = &page.results[0];
    assert_eq!(movie.id, 603);
    assert_eq!(movie.title, "The Matrix");
    assert_eq!(movie.backdrop_path, "");
    assert_eq!(movie.genre_ids, vec![28, 878]);
}

/// Non-2xx responses carry the status and body
#[tokio::test]
async fn test_popular_movies_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"status_message":"Invalid API key"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.popular_movies(1).await.unwrap_err();

    match &err {
        IngestionError::UpstreamStatus { status, body } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err
        .to_string()
        .starts_with("TMDB API returned status 401: "));
}

/// Malformed bodies surface as serialization errors
#[tokio::test]
async fn test_popular_movies_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.popular_movies(1).await.unwrap_err();

    assert!(matches!(err, IngestionError::SerializationError(_)));
}
