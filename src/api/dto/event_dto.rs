//! Event response bodies and the documented shape of the event form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, EventCategory};

/// Compact event view returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    /// Event id.
    pub id: i64,
    /// Event title.
    pub event_title: String,
    /// Host name.
    pub event_host_name: String,
    /// First day.
    pub event_start_date: NaiveDate,
    /// Last day.
    pub event_end_date: NaiveDate,
    /// Category, if set.
    pub event_category: Option<EventCategory>,
    /// Poster URL, if one was uploaded.
    pub event_main_poster_url: Option<String>,
    /// Organizer count.
    pub total_organizer: Option<i32>,
    /// Participant count.
    pub total_participant: Option<i32>,
    /// Program count.
    pub total_program: Option<i32>,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.get(),
            event_title: event.title,
            event_host_name: event.host_name,
            event_start_date: event.start_date,
            event_end_date: event.end_date,
            event_category: event.category,
            event_main_poster_url: event.main_poster_url,
            total_organizer: event.total_organizer,
            total_participant: event.total_participant,
            total_program: event.total_program,
        }
    }
}

/// `multipart/form-data` body of `POST /events`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateEventForm {
    /// Event title.
    event_title: String,
    /// Host name.
    event_host_name: String,
    /// First day, `YYYY-MM-DD`.
    event_start_date: NaiveDate,
    /// Last day, `YYYY-MM-DD`.
    event_end_date: NaiveDate,
    /// Category name.
    event_category: Option<EventCategory>,
    /// Description.
    event_description: Option<String>,
    /// Organizer count.
    total_organizer: Option<i32>,
    /// Participant count.
    total_participant: Option<i32>,
    /// Program count.
    total_program: Option<i32>,
    /// Main poster image.
    #[schema(value_type = Option<String>, format = Binary)]
    event_main_poster: Option<Vec<u8>>,
    /// Photos. Repeat the part once per file.
    #[schema(value_type = Vec<String>, format = Binary)]
    event_photos: Vec<Vec<u8>>,
}

/// `multipart/form-data` body of `PUT /events/{id}`. Every part is
/// optional; sent photos replace the stored list.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateEventForm {
    /// Event title.
    event_title: Option<String>,
    /// Host name.
    event_host_name: Option<String>,
    /// First day, `YYYY-MM-DD`.
    event_start_date: Option<NaiveDate>,
    /// Last day, `YYYY-MM-DD`.
    event_end_date: Option<NaiveDate>,
    /// Category name.
    event_category: Option<EventCategory>,
    /// Description.
    event_description: Option<String>,
    /// Organizer count.
    total_organizer: Option<i32>,
    /// Participant count.
    total_participant: Option<i32>,
    /// Program count.
    total_program: Option<i32>,
    /// Replacement poster image.
    #[schema(value_type = Option<String>, format = Binary)]
    event_main_poster: Option<Vec<u8>>,
    /// Replacement photos.
    #[schema(value_type = Vec<String>, format = Binary)]
    event_photos: Vec<Vec<u8>>,
}
