use movie_catalog_storage::{ImageCleanup, RecordingObjectStore, StorageError, UploadService};
use std::sync::Arc;

fn upload_service(store: &Arc<RecordingObjectStore>) -> UploadService {
    UploadService::new(store.clone(), "http://localhost:9000")
}

#[tokio::test]
async fn test_uploaded_image_round_trip_through_cleanup() {
    let store = Arc::new(RecordingObjectStore::new("movies"));
    let service = upload_service(&store);

    let upload = service.presign("poster.jpg", Some("image/png")).await.unwrap();
    assert!(service.owns(&upload.public_url));

    service.remove_image(&upload.public_url).await.unwrap();

    assert_eq!(store.deleted_keys(), vec![upload.key.clone()]);
    assert_eq!(
        store.presigned_requests(),
        vec![(upload.key, "image/png".to_string())]
    );
}

#[tokio::test]
async fn test_presigned_url_reference_is_stripped_of_query() {
    let store = Arc::new(RecordingObjectStore::new("movies"));
    let service = upload_service(&store);

    service
        .remove_image("http://localhost:9000/movies/backdrop_0a1b2c3d.jpg?X-Amz-Signature=abc")
        .await
        .unwrap();

    assert_eq!(store.deleted_keys(), vec!["backdrop_0a1b2c3d.jpg".to_string()]);
}

#[tokio::test]
async fn test_delete_failures_surface_as_errors() {
    let store = Arc::new(RecordingObjectStore::new("movies").failing_deletes());
    let service = upload_service(&store);

    let err = service
        .remove_image("http://localhost:9000/movies/a.jpg")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Delete(_)));
}
