//! REST API layer: route handlers, DTOs, form decoding and router
//! composition.
//!
//! Event endpoints are mounted under the configured prefix (`/api/v1` by
//! default); system endpoints live at the root.

pub mod dto;
pub mod form;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
///
/// An empty `api_prefix` mounts the event routes at the root.
pub fn build_router(api_prefix: &str) -> Router<AppState> {
    let api = handlers::routes();
    let router = if api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };
    let router = router.merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(openapi::swagger_ui(api_prefix));

    router
}
