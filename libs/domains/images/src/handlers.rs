use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        StorageErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ImageResult;
use crate::models::{CreateEventImage, EventImage, PresignUploadRequest, PresignedUrl};
use crate::repository::EventImageRepository;
use crate::service::{EventImageService, ImageStorageService};
use crate::storage::ObjectStorage;

#[derive(OpenApi)]
#[openapi(
    paths(list_event_images, add_event_image, list_images_for_event),
    components(
        schemas(EventImage, CreateEventImage),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Event Images", description = "Images attached to events")
    )
)]
pub struct EventImagesApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(presign_upload, presign_download, delete_image),
    components(
        schemas(PresignUploadRequest, PresignedUrl),
        responses(BadRequestValidationResponse, StorageErrorResponse)
    ),
    tags(
        (name = "Images", description = "Presigned object storage URLs")
    )
)]
pub struct ImagesApiDoc;

pub fn event_images_router<R: EventImageRepository + 'static>(
    service: EventImageService<R>,
) -> Router {
    Router::new()
        .route("/", get(list_event_images).post(add_event_image))
        .route("/{event_id}", get(list_images_for_event))
        .with_state(Arc::new(service))
}

pub fn images_router<S: ObjectStorage + 'static>(service: ImageStorageService<S>) -> Router {
    Router::new()
        .route("/presigned", post(presign_upload))
        .route("/{key}/presigned", get(presign_download))
        .route("/{key}", delete(delete_image))
        .with_state(Arc::new(service))
}

/// List all event images
#[utoipa::path(
    get,
    path = "",
    tag = "Event Images",
    responses(
        (status = 200, description = "All event images", body = Vec<EventImage>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_event_images<R: EventImageRepository>(
    State(service): State<Arc<EventImageService<R>>>,
) -> ImageResult<Json<Vec<EventImage>>> {
    Ok(Json(service.list_images().await?))
}

/// Attach an uploaded image to an event
#[utoipa::path(
    post,
    path = "",
    tag = "Event Images",
    request_body = CreateEventImage,
    responses(
        (status = 201, description = "Image attached", body = EventImage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_event_image<R: EventImageRepository>(
    State(service): State<Arc<EventImageService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEventImage>,
) -> ImageResult<impl IntoResponse> {
    let image = service.add_image(input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Images of one event
#[utoipa::path(
    get,
    path = "/{event_id}",
    tag = "Event Images",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "The event's images", body = Vec<EventImage>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_images_for_event<R: EventImageRepository>(
    State(service): State<Arc<EventImageService<R>>>,
    UuidPath(event_id): UuidPath,
) -> ImageResult<Json<Vec<EventImage>>> {
    Ok(Json(service.list_for_event(event_id).await?))
}

/// Presigned PUT URL for a new upload
#[utoipa::path(
    post,
    path = "/presigned",
    tag = "Images",
    request_body = PresignUploadRequest,
    responses(
        (status = 200, description = "Upload URL, valid for ten minutes", body = PresignedUrl),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = StorageErrorResponse)
    )
)]
async fn presign_upload<S: ObjectStorage>(
    State(service): State<Arc<ImageStorageService<S>>>,
    ValidatedJson(request): ValidatedJson<PresignUploadRequest>,
) -> ImageResult<Json<PresignedUrl>> {
    Ok(Json(service.presign_upload(request).await?))
}

/// Presigned GET URL for an object
#[utoipa::path(
    get,
    path = "/{key}/presigned",
    tag = "Images",
    params(("key" = String, Path, description = "Object key")),
    responses(
        (status = 200, description = "Download URL, valid for ten minutes", body = PresignedUrl),
        (status = 502, response = StorageErrorResponse)
    )
)]
async fn presign_download<S: ObjectStorage>(
    State(service): State<Arc<ImageStorageService<S>>>,
    Path(key): Path<String>,
) -> ImageResult<Json<PresignedUrl>> {
    Ok(Json(service.presign_download(key).await?))
}

/// Delete an object from the bucket
#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Images",
    params(("key" = String, Path, description = "Object key")),
    responses(
        (status = 204, description = "Object deleted"),
        (status = 502, response = StorageErrorResponse)
    )
)]
async fn delete_image<S: ObjectStorage>(
    State(service): State<Arc<ImageStorageService<S>>>,
    Path(key): Path<String>,
) -> ImageResult<StatusCode> {
    service.delete(key).await?;
    Ok(StatusCode::NO_CONTENT)
}
