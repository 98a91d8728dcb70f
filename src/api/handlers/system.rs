//! System endpoints: welcome message and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the database answers, `degraded` otherwise.
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// `up` or `down`.
    pub database: String,
    /// `available` or `unavailable`.
    pub storage: String,
}

/// `GET /`: Welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Welcome message",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse),
    )
)]
pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(MessageResponse {
        message: format!("Welcome to the {}", state.project_name),
    })
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Pings the database and reports whether uploads are possible. Responds 503 when the database is unreachable.",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = match state.event_service.repository().ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "health check: database unreachable");
            false
        }
    };
    let storage_available = state.event_service.media().is_available();

    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database_up { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if database_up { "up" } else { "down" }.to_string(),
            storage: if storage_available {
                "available"
            } else {
                "unavailable"
            }
            .to_string(),
        }),
    )
}

/// System routes mounted at the root level (not under the API prefix).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
