mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{tmdb_movie, TestContext};
use movie_catalog_ingestion::MockMetadataSource;
use serde_json::Value;

#[actix_web::test]
async fn test_last_log_is_null_before_first_sync() {
    let ctx = TestContext::new(MockMetadataSource::new());
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/sync/last-log").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "No sync log found");
    assert!(body.get("data").unwrap().is_null());
}

#[actix_web::test]
async fn test_sync_then_dashboard_and_charts() {
    let ctx = TestContext::new(MockMetadataSource::new().with_page(
        1,
        vec![
            tmdb_movie(1, "Heat", "1995-12-15"),
            tmdb_movie(2, "Ronin", "1998-09-25"),
        ],
    ));
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/sync/movies?pages=1")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["status"], "success");
    assert_eq!(body["data"]["movies_added"], 2);
    assert_eq!(body["data"]["movies_updated"], 0);

    let req = test::TestRequest::get().uri("/api/v1/sync/last-log").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["sync_type"], "manual");

    let req = test::TestRequest::get().uri("/api/v1/dashboard/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_movies"], 2);
    assert!(!body["data"]["last_sync_time"].is_null());

    let req = test::TestRequest::get().uri("/api/v1/charts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pie_chart"][0]["code"], "en");
    assert_eq!(body["data"]["pie_chart"][0]["value"], 2);
    assert_eq!(body["data"]["column_chart"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/charts/column?start_date=1997-01-01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["label"], "1998");

    let req = test::TestRequest::get().uri("/api/v1/charts/monthly/1995").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let months = body["data"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[11]["label"], "Dec");
    assert_eq!(months[11]["value"], 1);
}

#[actix_web::test]
async fn test_failed_sync_returns_log_as_data() {
    let ctx = TestContext::new(
        MockMetadataSource::new()
            .with_page(1, vec![tmdb_movie(1, "Heat", "1995-12-15")])
            .fail_on_page(2, 500, "upstream down"),
    );
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/sync/movies?pages=3")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["data"]["status"], "failed");
    assert!(body["data"]["error_message"]
        .as_str()
        .unwrap()
        .starts_with("failed to fetch page 2"));
    assert_eq!(ctx.source.requested_pages(), vec![1, 2]);
}

#[actix_web::test]
async fn test_monthly_chart_year_validation() {
    let ctx = TestContext::new(MockMetadataSource::new());
    let app = test_app!(ctx);

    for uri in ["/api/v1/charts/monthly/19x5", "/api/v1/charts/monthly/1800"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn test_presign_and_health() {
    let ctx = TestContext::new(MockMetadataSource::new());
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/upload/presign?filename=poster.png&contentType=image/png")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let public_url = body["data"]["public_url"].as_str().unwrap();
    assert!(public_url.starts_with("http://localhost:9000/movies/poster_"));
    assert!(public_url.ends_with(".png"));
    assert_eq!(ctx.objects.presigned_requests()[0].1, "image/png");

    let req = test::TestRequest::get().uri("/api/v1/upload/presign").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "healthy");
}
