//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use crate::api::dto::{CreateEventForm, EventSummary, MessageResponse, UpdateEventForm};
use crate::api::handlers::{events, system};
use crate::domain::{Event, EventCategory};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI documentation for the event API.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Event Builder API"),
    paths(
        events::create_event,
        events::list_events,
        events::gallery,
        events::get_event,
        events::update_event,
        events::delete_event,
        system::root_handler,
        system::health_handler,
    ),
    components(schemas(
        Event,
        EventCategory,
        EventSummary,
        CreateEventForm,
        UpdateEventForm,
        MessageResponse,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Events", description = "Event management and media uploads"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Path the OpenAPI JSON is served from.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Prefix the event paths of [`ApiDoc`] are declared under.
pub const DOCUMENTED_PREFIX: &str = "/api/v1";

/// [`ApiDoc`] with the event paths moved under `api_prefix`.
///
/// An empty prefix documents the event routes at the root.
#[must_use]
pub fn document(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if api_prefix == DOCUMENTED_PREFIX {
        return doc;
    }
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) => (format!("{api_prefix}{rest}"), item),
            None => (path, item),
        })
        .collect();
    doc
}

/// Swagger UI serving [`document`] for `api_prefix`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui(api_prefix: &str) -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_JSON_PATH, document(api_prefix))
}
