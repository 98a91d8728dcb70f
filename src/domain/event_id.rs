//! Type-safe event identifier.
//!
//! [`EventId`] is a newtype wrapper around the database-generated `BIGSERIAL`
//! key so that event identifiers cannot be confused with counts or offsets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a persisted event.
///
/// Assigned exactly once by the persistence layer on insert and never
/// reused. Serialized as a plain JSON integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw database key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw database key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}
