//! Handler tests for the events domain
//!
//! Exercise the router against the in-memory repository: request parsing,
//! status codes and the error body shape for rejected events.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: InMemoryEventRepository) -> Router {
    handlers::router(EventService::new(repo))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn gala(host_id: Uuid) -> Value {
    json!({
        "name": "Gala",
        "description": "Annual gala",
        "latitude": 16.0740,
        "longitude": 108.1500,
        "host_id": host_id,
        "start_time": "2025-06-01T18:00:00Z",
        "end_time": "2025-06-01T20:00:00Z"
    })
}

#[tokio::test]
async fn test_create_event_returns_201_with_default_address() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(post_json("/", gala(Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let event: Event = json_body(response.into_body()).await;
    assert_eq!(event.name, "Gala");
    assert_eq!(event.address, DEFAULT_ADDRESS);
}

#[tokio::test]
async fn test_conflicting_event_returns_400_with_reasons() {
    let repo = InMemoryEventRepository::new();
    let first = app(repo.clone())
        .oneshot(post_json("/", gala(Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut second = gala(Uuid::now_v7());
    second["latitude"] = json!(16.0745);
    second["longitude"] = json!(108.1505);
    second["start_time"] = json!("2025-06-01T19:00:00Z");
    second["end_time"] = json!("2025-06-01T21:00:00Z");

    let response = app(repo.clone())
        .oneshot(post_json("/", second))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
    assert_eq!(
        body["details"],
        json!([
            "duplicate event name",
            "location and time-slot conflict with another event"
        ])
    );

    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_back_to_back_events_are_accepted() {
    let host = Uuid::now_v7();
    let repo = InMemoryEventRepository::new();

    let mut expo = gala(host);
    expo["name"] = json!("Expo");
    expo["start_time"] = json!("2025-06-01T10:00:00Z");
    expo["end_time"] = json!("2025-06-01T12:00:00Z");

    let mut fair = gala(host);
    fair["name"] = json!("Fair");
    fair["start_time"] = json!("2025-06-01T12:00:00Z");
    fair["end_time"] = json!("2025-06-01T14:00:00Z");

    for body in [expo, fair] {
        let response = app(repo.clone()).oneshot(post_json("/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_create_event_validates_input() {
    let mut body = gala(Uuid::now_v7());
    body["name"] = json!("");
    body["latitude"] = json!(95.0);

    let response = app(InMemoryEventRepository::new())
        .oneshot(post_json("/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["latitude"].is_array());
}

#[tokio::test]
async fn test_create_event_rejects_inverted_window() {
    let mut body = gala(Uuid::now_v7());
    body["end_time"] = json!("2025-06-01T17:00:00Z");

    let response = app(InMemoryEventRepository::new())
        .oneshot(post_json("/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conflict_dry_run_persists_nothing() {
    let host = Uuid::now_v7();
    let repo = InMemoryEventRepository::new();
    app(repo.clone())
        .oneshot(post_json("/", gala(host)))
        .await
        .unwrap();

    let mut candidate = gala(host);
    candidate["name"] = json!("Afterparty");
    candidate["latitude"] = json!(21.0285);
    candidate["longitude"] = json!(105.8542);

    let response = app(repo.clone())
        .oneshot(post_json("/conflicts", candidate))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report: ConflictReport = json_body(response.into_body()).await;
    assert!(!report.accepted);
    assert_eq!(
        report.violations,
        vec!["host already has another event in this time slot".to_string()]
    );
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_event_not_found_and_invalid_uuid() {
    let router = app(InMemoryEventRepository::new());

    let missing = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = router
        .oneshot(Request::builder().uri("/not-a-uuid").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_events_empty_is_ok() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<Event> = json_body(response.into_body()).await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_list_events_filters_by_host() {
    let host = Uuid::now_v7();
    let repo = InMemoryEventRepository::new();
    app(repo.clone())
        .oneshot(post_json("/", gala(host)))
        .await
        .unwrap();

    let response = app(repo)
        .oneshot(
            Request::builder()
                .uri(format!("/?host_id={}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let events: Vec<Event> = json_body(response.into_body()).await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_list_events_rejects_non_positive_limit() {
    for limit in ["0", "-1"] {
        let response = app(InMemoryEventRepository::new())
            .oneshot(
                Request::builder()
                    .uri(format!("/?limit={limit}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "limit={limit}");
    }
}

#[tokio::test]
async fn test_update_then_delete_event() {
    let repo = InMemoryEventRepository::new();
    let created = app(repo.clone())
        .oneshot(post_json("/", gala(Uuid::now_v7())))
        .await
        .unwrap();
    let event: Event = json_body(created.into_body()).await;

    let update = Request::builder()
        .method("PUT")
        .uri(format!("/{}", event.id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"description":"Moved indoors"}"#))
        .unwrap();
    let response = app(repo.clone()).oneshot(update).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Event = json_body(response.into_body()).await;
    assert_eq!(updated.description, "Moved indoors");
    assert_eq!(updated.name, "Gala");

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", event.id))
            .body(Body::empty())
            .unwrap()
    };
    let response = app(repo.clone()).oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app(repo).oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
