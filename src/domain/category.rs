//! Closed set of event categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Category an event belongs to.
///
/// Stored as the PostgreSQL enum `event_category` and exchanged on the wire
/// by its display name (`"Science"`, `"Technology"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "event_category")]
pub enum EventCategory {
    /// Science fairs, talks and exhibitions.
    Science,
    /// Technology meetups, hackathons and workshops.
    Technology,
    /// Sports tournaments and matches.
    Sports,
    /// Literature readings and book clubs.
    Literature,
    /// Debate competitions.
    Debate,
}

/// Error returned when a string does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

impl EventCategory {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Science,
        Self::Technology,
        Self::Sports,
        Self::Literature,
        Self::Debate,
    ];

    /// Returns the wire name of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Technology => "Technology",
            Self::Sports => "Sports",
            Self::Literature => "Literature",
            Self::Debate => "Debate",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    /// Parses a category name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}
