//! Event handlers: create, list, get, update, delete and gallery.
//!
//! Paths are declared under `/api/v1` and moved to the configured prefix
//! by [`crate::api::openapi::document`]. Malformed path and query values
//! are answered in the [`ErrorResponse`] shape with code 1002.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateEventForm, EventSummary, ListParams, UpdateEventForm};
use crate::api::form::EventForm;
use crate::app_state::AppState;
use crate::domain::{Event, EventId};
use crate::error::{ApiError, ErrorResponse};

/// `POST /events`: Create an event with its poster and photos.
///
/// # Errors
///
/// Returns [`ApiError`] on missing fields, bad values or upload and
/// database failures.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Accepts a multipart form. Title, host name and both dates are mandatory. The main poster and each photo are uploaded to object storage before the event is saved.",
    request_body(content = CreateEventForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Upload or database failure", body = ErrorResponse),
        (status = 503, description = "Object storage unavailable", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (event, media) = EventForm::from_multipart(multipart)
        .await?
        .into_new_event()?;
    let created = state.event_service.create_event(event, media).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /events`: List events ordered by start date.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a page of event summaries ordered by ascending start date.",
    params(ListParams),
    responses(
        (status = 200, description = "Event summaries", body = Vec<EventSummary>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let events = state
        .event_service
        .list_events(params.skip, params.limit)
        .await?;
    let summaries: Vec<EventSummary> = events.into_iter().map(EventSummary::from).collect();
    Ok(Json(summaries))
}

/// `GET /events/gallery/all`: All events with their photo URLs.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/gallery/all",
    tag = "Events",
    summary = "Event gallery",
    description = "Returns up to 1000 full events, including poster and photo URLs, ordered by ascending start date.",
    responses(
        (status = 200, description = "All events", body = Vec<Event>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn gallery(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.event_service.gallery().await?))
}

/// `GET /events/{id}`: Get one event.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get an event",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.event_service.get_event(EventId::new(id)).await?))
}

/// `PUT /events/{id}`: Partially update an event.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist, plus
/// the errors of [`create_event`].
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Accepts the same multipart form as create, with every part optional. A new poster replaces the stored one; new photos replace the whole photo list.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body(content = UpdateEventForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Upload or database failure", body = ErrorResponse),
        (status = 503, description = "Object storage unavailable", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let (patch, media) = EventForm::from_multipart(multipart).await?.into_patch();
    let updated = state
        .event_service
        .update_event(EventId::new(id), patch, media)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /events/{id}`: Delete an event.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Removes the event and returns its last state. Uploaded files are kept in object storage.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Deleted event", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    Ok(Json(
        state.event_service.delete_event(EventId::new(id)).await?,
    ))
}

/// Event routes. `/events/` is accepted as an alias of `/events`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/", post(create_event).get(list_events))
        .route("/events/gallery/all", get(gallery))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
