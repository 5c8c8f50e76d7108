use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, RejectedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{ConflictReport, CreateEvent, Event, EventFilter, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        check_event_conflicts,
        get_event,
        update_event,
        delete_event,
    ),
    components(
        schemas(Event, CreateEvent, UpdateEvent, EventFilter, ConflictReport),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            RejectedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event scheduling with conflict detection")
    )
)]
pub struct ApiDoc;

pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/conflicts", post(check_event_conflicts))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(shared_service)
}

/// List events with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventFilter),
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events(filter).await?;
    Ok(Json(events))
}

/// Create an event if it breaks no scheduling rule
///
/// A rejected event returns 400 with every violated rule listed in `details`.
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = RejectedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Dry-run the scheduling rules for a proposed event
#[utoipa::path(
    post,
    path = "/conflicts",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 200, description = "Conflict report", body = ConflictReport),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_event_conflicts<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<Json<ConflictReport>> {
    let report = service.preview_conflicts(input).await?;
    Ok(Json(report))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<Event>> {
    let event = service.update_event(id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<StatusCode> {
    service.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
