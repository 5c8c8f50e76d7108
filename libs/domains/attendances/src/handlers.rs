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
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AttendanceResult;
use crate::models::{Attendance, AttendanceKey};
use crate::repository::AttendanceRepository;
use crate::service::AttendanceService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_attendances,
        register_attendance,
        unregister_attendance,
        list_user_attendances,
        list_event_attendances,
        check_in,
    ),
    components(
        schemas(Attendance, AttendanceKey),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Attendances", description = "Event registrations and check-ins")
    )
)]
pub struct ApiDoc;

pub fn router<R: AttendanceRepository + 'static>(service: AttendanceService<R>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_attendances)
                .post(register_attendance)
                .delete(unregister_attendance),
        )
        .route("/user/{user_id}", get(list_user_attendances))
        .route("/event/{event_id}", get(list_event_attendances))
        .route("/checkin", post(check_in))
        .with_state(Arc::new(service))
}

/// List every registration
#[utoipa::path(
    get,
    path = "",
    tag = "Attendances",
    responses(
        (status = 200, description = "All registrations", body = Vec<Attendance>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_attendances<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
) -> AttendanceResult<Json<Vec<Attendance>>> {
    Ok(Json(service.list_attendances().await?))
}

/// Register a user for an event
#[utoipa::path(
    post,
    path = "",
    tag = "Attendances",
    request_body = AttendanceKey,
    responses(
        (status = 201, description = "Registered", body = Attendance),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_attendance<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    ValidatedJson(key): ValidatedJson<AttendanceKey>,
) -> AttendanceResult<impl IntoResponse> {
    let attendance = service.register(key).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Remove a registration
#[utoipa::path(
    delete,
    path = "",
    tag = "Attendances",
    params(AttendanceKey),
    responses(
        (status = 204, description = "Registration removed"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unregister_attendance<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    Query(key): Query<AttendanceKey>,
) -> AttendanceResult<StatusCode> {
    service.unregister(key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Registrations of one user
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "Attendances",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's registrations", body = Vec<Attendance>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_user_attendances<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(user_id): UuidPath,
) -> AttendanceResult<Json<Vec<Attendance>>> {
    Ok(Json(service.list_for_user(user_id).await?))
}

/// Registrations for one event
#[utoipa::path(
    get,
    path = "/event/{event_id}",
    tag = "Attendances",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "The event's registrations", body = Vec<Attendance>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_event_attendances<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(event_id): UuidPath,
) -> AttendanceResult<Json<Vec<Attendance>>> {
    Ok(Json(service.list_for_event(event_id).await?))
}

/// Check a registered attendee in
#[utoipa::path(
    post,
    path = "/checkin",
    tag = "Attendances",
    request_body = AttendanceKey,
    responses(
        (status = 200, description = "Checked in", body = Attendance),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_in<R: AttendanceRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    ValidatedJson(key): ValidatedJson<AttendanceKey>,
) -> AttendanceResult<Json<Attendance>> {
    Ok(Json(service.check_in(key).await?))
}
