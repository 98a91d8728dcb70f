//! Database row model for the `events` table.

use chrono::NaiveDate;

use crate::domain::{Event, EventCategory, EventId};

/// Column list shared by every query returning full rows.
pub const EVENT_COLUMNS: &str = "id, title, host_name, start_date, end_date, category, \
     description, total_organizer, total_participant, total_program, main_poster_url, photo_urls";

/// A row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Event title.
    pub title: String,
    /// Host name.
    pub host_name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// `event_category` enum value.
    pub category: Option<EventCategory>,
    /// Free-text description.
    pub description: Option<String>,
    /// Organizer count.
    pub total_organizer: Option<i32>,
    /// Participant count.
    pub total_participant: Option<i32>,
    /// Program count.
    pub total_program: Option<i32>,
    /// Poster URL.
    pub main_poster_url: Option<String>,
    /// `TEXT[]` of photo URLs.
    pub photo_urls: Vec<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::new(row.id),
            title: row.title,
            host_name: row.host_name,
            start_date: row.start_date,
            end_date: row.end_date,
            category: row.category,
            description: row.description,
            total_organizer: row.total_organizer,
            total_participant: row.total_participant,
            total_program: row.total_program,
            main_poster_url: row.main_poster_url,
            photo_urls: row.photo_urls,
        }
    }
}
