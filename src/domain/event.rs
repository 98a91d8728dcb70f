//! The event entity and its create/update payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventCategory, EventId};
use crate::error::ApiError;

/// A persisted event.
///
/// Title, host name and both dates are always populated. `photo_urls`
/// keeps the order in which the photos were uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Database-assigned identifier.
    #[schema(value_type = i64)]
    pub id: EventId,
    /// Event title.
    #[serde(rename = "event_title")]
    pub title: String,
    /// Name of the hosting person or organization.
    #[serde(rename = "event_host_name")]
    pub host_name: String,
    /// First day of the event.
    #[serde(rename = "event_start_date")]
    pub start_date: NaiveDate,
    /// Last day of the event.
    #[serde(rename = "event_end_date")]
    pub end_date: NaiveDate,
    /// Optional category.
    #[serde(rename = "event_category")]
    pub category: Option<EventCategory>,
    /// Optional free-text description.
    #[serde(rename = "event_description")]
    pub description: Option<String>,
    /// Number of organizers.
    pub total_organizer: Option<i32>,
    /// Number of participants.
    pub total_participant: Option<i32>,
    /// Number of programs.
    pub total_program: Option<i32>,
    /// Public URL of the main poster.
    #[serde(rename = "event_main_poster_url")]
    pub main_poster_url: Option<String>,
    /// Public URLs of the event photos, in upload order.
    #[serde(rename = "event_photos_urls", default)]
    pub photo_urls: Vec<String>,
}

/// Fields of an event that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Host name.
    pub host_name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Optional category.
    pub category: Option<EventCategory>,
    /// Optional description.
    pub description: Option<String>,
    /// Number of organizers.
    pub total_organizer: Option<i32>,
    /// Number of participants.
    pub total_participant: Option<i32>,
    /// Number of programs.
    pub total_program: Option<i32>,
    /// Poster URL, filled in after upload.
    pub main_poster_url: Option<String>,
    /// Photo URLs, filled in after upload.
    pub photo_urls: Vec<String>,
}

impl NewEvent {
    /// Creates an event draft from its mandatory fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        host_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            host_name: host_name.into(),
            start_date,
            end_date,
            category: None,
            description: None,
            total_organizer: None,
            total_participant: None,
            total_program: None,
            main_poster_url: None,
            photo_urls: Vec::new(),
        }
    }

    /// Checks the mandatory fields, the date range and the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingMandatoryFields`] if the title or host
    /// name is blank, [`ApiError::InvalidDateRange`] if the event ends
    /// before it starts, and [`ApiError::InvalidRequest`] for a negative
    /// total.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.host_name.trim().is_empty() {
            return Err(ApiError::MissingMandatoryFields);
        }
        check_date_range(self.start_date, self.end_date)?;
        check_totals(
            self.total_organizer,
            self.total_participant,
            self.total_program,
        )
    }

    /// Attaches the given id, producing the stored entity.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            host_name: self.host_name,
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
            description: self.description,
            total_organizer: self.total_organizer,
            total_participant: self.total_participant,
            total_program: self.total_program,
            main_poster_url: self.main_poster_url,
            photo_urls: self.photo_urls,
        }
    }
}

/// Partial update of an event. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,
    /// New host name.
    pub host_name: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
    /// New category.
    pub category: Option<EventCategory>,
    /// New description.
    pub description: Option<String>,
    /// New organizer count.
    pub total_organizer: Option<i32>,
    /// New participant count.
    pub total_participant: Option<i32>,
    /// New program count.
    pub total_program: Option<i32>,
    /// New poster URL.
    pub main_poster_url: Option<String>,
    /// Replacement photo URLs. Replaces the whole list when set.
    pub photo_urls: Option<Vec<String>>,
}

impl EventPatch {
    /// Checks this patch against the record it will be applied to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingMandatoryFields`] if a supplied title or
    /// host name is blank, [`ApiError::InvalidDateRange`] if the merged
    /// dates are out of order, and [`ApiError::InvalidRequest`] for a
    /// negative total.
    pub fn validate_against(&self, current: &Event) -> Result<(), ApiError> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.title) || blank(&self.host_name) {
            return Err(ApiError::MissingMandatoryFields);
        }
        check_date_range(
            self.start_date.unwrap_or(current.start_date),
            self.end_date.unwrap_or(current.end_date),
        )?;
        check_totals(
            self.total_organizer,
            self.total_participant,
            self.total_program,
        )
    }
}

impl Event {
    /// Overwrites every field that is set in `patch`.
    pub fn apply(&mut self, patch: EventPatch) {
        let EventPatch {
            title,
            host_name,
            start_date,
            end_date,
            category,
            description,
            total_organizer,
            total_participant,
            total_program,
            main_poster_url,
            photo_urls,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = host_name {
            self.host_name = v;
        }
        if let Some(v) = start_date {
            self.start_date = v;
        }
        if let Some(v) = end_date {
            self.end_date = v;
        }
        if category.is_some() {
            self.category = category;
        }
        if description.is_some() {
            self.description = description;
        }
        if total_organizer.is_some() {
            self.total_organizer = total_organizer;
        }
        if total_participant.is_some() {
            self.total_participant = total_participant;
        }
        if total_program.is_some() {
            self.total_program = total_program;
        }
        if main_poster_url.is_some() {
            self.main_poster_url = main_poster_url;
        }
        if let Some(v) = photo_urls {
            self.photo_urls = v;
        }
    }
}

fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if start > end {
        return Err(ApiError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn check_totals(
    organizer: Option<i32>,
    participant: Option<i32>,
    program: Option<i32>,
) -> Result<(), ApiError> {
    for (name, value) in [
        ("total_organizer", organizer),
        ("total_participant", participant),
        ("total_program", program),
    ] {
        if value.is_some_and(|v| v < 0) {
            return Err(ApiError::InvalidRequest(format!(
                "{name} must not be negative"
            )));
        }
    }
    Ok(())
}
