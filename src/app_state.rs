//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::EventService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all business logic.
    pub event_service: Arc<EventService>,
    /// Title reported by the root endpoint.
    pub project_name: Arc<str>,
}

impl AppState {
    /// Wraps a service into handler state.
    #[must_use]
    pub fn new(event_service: EventService, project_name: impl Into<Arc<str>>) -> Self {
        Self {
            event_service: Arc::new(event_service),
            project_name: project_name.into(),
        }
    }
}
