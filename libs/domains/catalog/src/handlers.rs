use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
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

use crate::error::CatalogResult;
use crate::models::{CatalogEntry, CreateCatalogEntry};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// Shared by the categories and statuses routers; mounted once per table.
#[derive(OpenApi)]
#[openapi(
    paths(list_entries, create_entry, get_entry),
    components(
        schemas(CatalogEntry, CreateCatalogEntry),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Event categories and statuses")
    )
)]
pub struct ApiDoc;

pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/{id}", get(get_entry))
        .with_state(Arc::new(service))
}

/// List all entries
#[utoipa::path(
    get,
    path = "",
    tag = "Catalog",
    responses(
        (status = 200, description = "All entries", body = Vec<CatalogEntry>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_entries<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CatalogEntry>>> {
    Ok(Json(service.list_entries().await?))
}

/// Create an entry
#[utoipa::path(
    post,
    path = "",
    tag = "Catalog",
    request_body = CreateCatalogEntry,
    responses(
        (status = 201, description = "Entry created", body = CatalogEntry),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_entry<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCatalogEntry>,
) -> CatalogResult<impl IntoResponse> {
    let entry = service.create_entry(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get an entry by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry found", body = CatalogEntry),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_entry<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<CatalogEntry>> {
    Ok(Json(service.get_entry(id).await?))
}
