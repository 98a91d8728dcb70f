//! Service layer: business logic orchestration.
//!
//! [`EventService`] is the single entry point for all event operations.
//! REST handlers delegate to it after decoding requests.

pub mod event_service;

pub use event_service::EventService;
