//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Management API",
        version = "0.1.0",
        description = "Events with location and host scheduling conflict checks, attendances, images and accounts",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    modifiers(&BearerAuth),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/categories", api = domain_catalog::ApiDoc),
        (path = "/api/statuses", api = domain_catalog::ApiDoc),
        (path = "/api/attendances", api = domain_attendances::ApiDoc),
        (path = "/api/event-images", api = domain_images::EventImagesApiDoc),
        (path = "/api/images", api = domain_images::ImagesApiDoc),
        (path = "/api/auth", api = domain_users::AuthApiDoc),
        (path = "/api/users", api = domain_users::UsersApiDoc),
        (path = "/api/roles", api = domain_users::RolesApiDoc)
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
