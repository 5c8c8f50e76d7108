//! Handler tests for the catalog domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: InMemoryCatalogRepository) -> Router {
    handlers::router(CatalogService::new(repo))
}

fn create(name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": name }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_and_fetch_category() {
    let repo = InMemoryCatalogRepository::new(CatalogKind::Category);

    let response = app(repo.clone()).oneshot(create("Music")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CatalogEntry = json_body(response.into_body()).await;

    let response = app(repo)
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: CatalogEntry = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_status_is_conflict() {
    let repo = InMemoryCatalogRepository::new(CatalogKind::Status);
    app(repo.clone()).oneshot(create("Open")).await.unwrap();

    let response = app(repo).oneshot(create("Open")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Status 'Open' already exists");
}

#[tokio::test]
async fn test_list_is_sorted_by_name() {
    let repo = InMemoryCatalogRepository::new(CatalogKind::Category);
    for name in ["Sports", "Art", "Music"] {
        app(repo.clone()).oneshot(create(name)).await.unwrap();
    }

    let response = app(repo)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let entries: Vec<CatalogEntry> = json_body(response.into_body()).await;
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Art", "Music", "Sports"]);
}

#[tokio::test]
async fn test_missing_entry_is_not_found() {
    let response = app(InMemoryCatalogRepository::new(CatalogKind::Category))
        .oneshot(
            Request::builder()
                .uri(format!("/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_name_fails_validation() {
    let response = app(InMemoryCatalogRepository::new(CatalogKind::Category))
        .oneshot(create(""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
