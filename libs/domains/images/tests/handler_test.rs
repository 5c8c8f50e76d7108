//! Handler tests for the images domain

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_images::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Signs nothing; records deletions.
#[derive(Clone, Default)]
struct FakeStorage {
    deleted: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn presign_upload(
        &self,
        key: &str,
        _file_name: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> ImageResult<String> {
        Ok(format!("https://bucket.test/{key}?verb=PUT&expires={}", expires_in.as_secs()))
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> ImageResult<String> {
        Ok(format!("https://bucket.test/{key}?verb=GET&expires={}", expires_in.as_secs()))
    }

    async fn delete(&self, key: &str) -> ImageResult<()> {
        if self.fail {
            return Err(ImageError::Storage("bucket unreachable".to_string()));
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

fn images_app(storage: FakeStorage) -> Router {
    handlers::images_router(ImageStorageService::new(storage, Duration::from_secs(600)))
}

fn event_images_app(repo: InMemoryEventImageRepository) -> Router {
    handlers::event_images_router(EventImageService::new(repo))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_presign_upload_returns_fresh_key() {
    let response = images_app(FakeStorage::default())
        .oneshot(post_json(
            "/presigned",
            json!({ "file_name": "poster.png", "content_type": "image/png" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let presigned: PresignedUrl = json_body(response.into_body()).await;
    assert!(Uuid::parse_str(&presigned.key).is_ok());
    assert!(presigned.url.contains("verb=PUT"));
    assert!(presigned.url.ends_with("expires=600"));
}

#[tokio::test]
async fn test_presign_upload_requires_file_name() {
    let response = images_app(FakeStorage::default())
        .oneshot(post_json(
            "/presigned",
            json!({ "file_name": "", "content_type": "image/png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_presign_download_echoes_key() {
    let response = images_app(FakeStorage::default())
        .oneshot(
            Request::builder()
                .uri("/abc-123/presigned")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let presigned: PresignedUrl = json_body(response.into_body()).await;
    assert_eq!(presigned.key, "abc-123");
    assert!(presigned.url.contains("verb=GET"));
}

#[tokio::test]
async fn test_delete_object() {
    let storage = FakeStorage::default();
    let response = images_app(storage.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(*storage.deleted.lock().unwrap(), vec!["abc-123".to_string()]);
}

#[tokio::test]
async fn test_storage_failure_is_bad_gateway() {
    let storage = FakeStorage {
        fail: true,
        ..FakeStorage::default()
    };
    let response = images_app(storage)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "OBJECT_STORAGE_ERROR");
}

#[tokio::test]
async fn test_new_thumbnail_replaces_old_one() {
    let repo = InMemoryEventImageRepository::new();
    let event_id = Uuid::now_v7();

    for key in ["first", "second"] {
        let response = event_images_app(repo.clone())
            .oneshot(post_json(
                "/",
                json!({ "event_id": event_id, "image_key": key, "is_thumbnail": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = event_images_app(repo)
        .oneshot(
            Request::builder()
                .uri(format!("/{event_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let images: Vec<EventImage> = json_body(response.into_body()).await;

    let thumbnails: Vec<_> = images
        .iter()
        .filter(|image| image.is_thumbnail)
        .map(|image| image.image_key.as_str())
        .collect();
    assert_eq!(images.len(), 2);
    assert_eq!(thumbnails, vec!["second"]);
}
