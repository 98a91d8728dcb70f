//! Persistence layer: durable storage of event records.
//!
//! Provides the [`EventRepository`] trait. The production implementation
//! uses `sqlx::PgPool` for async PostgreSQL access; [`MemoryEventRepository`]
//! backs tests and database-less local runs.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Event, EventId, EventPatch, NewEvent};
use crate::error::ApiError;

pub use memory::MemoryEventRepository;
pub use postgres::PgEventRepository;

/// Largest page any listing returns.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Storage of [`Event`] rows.
///
/// Listings are ordered by ascending start date, ties broken by id.
#[async_trait]
pub trait EventRepository: fmt::Debug + Send + Sync {
    /// Inserts a new row and returns it with its assigned id.
    async fn create(&self, event: NewEvent) -> Result<Event, ApiError>;

    /// Looks up a single row.
    async fn get(&self, id: EventId) -> Result<Option<Event>, ApiError>;

    /// Returns up to `limit` rows after skipping `skip`.
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Event>, ApiError>;

    /// Applies `patch` to the row, returning the updated row or `None` if
    /// it does not exist.
    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, ApiError>;

    /// Removes the row, returning its last state or `None` if it does not
    /// exist.
    async fn delete(&self, id: EventId) -> Result<Option<Event>, ApiError>;

    /// Checks that the backing store answers.
    async fn ping(&self) -> Result<(), ApiError>;
}
