//! Decoding of the multipart form used by create and update.
//!
//! Text parts carry the scalar fields, `event_main_poster` carries at most
//! one file and `event_photos` may repeat. Empty text parts and the empty
//! file part a browser sends for an untouched file input are treated as
//! absent.

use axum::extract::Multipart;
use chrono::NaiveDate;

use crate::domain::{EventCategory, EventPatch, NewEvent};
use crate::error::ApiError;
use crate::storage::{EventMedia, UploadedFile};

/// Form field carrying the title.
pub const TITLE: &str = "event_title";
/// Form field carrying the host name.
pub const HOST_NAME: &str = "event_host_name";
/// Form field carrying the first day (`YYYY-MM-DD`).
pub const START_DATE: &str = "event_start_date";
/// Form field carrying the last day (`YYYY-MM-DD`).
pub const END_DATE: &str = "event_end_date";
/// Form field carrying the category name.
pub const CATEGORY: &str = "event_category";
/// Form field carrying the description.
pub const DESCRIPTION: &str = "event_description";
/// Form field carrying the organizer count.
pub const TOTAL_ORGANIZER: &str = "total_organizer";
/// Form field carrying the participant count.
pub const TOTAL_PARTICIPANT: &str = "total_participant";
/// Form field carrying the program count.
pub const TOTAL_PROGRAM: &str = "total_program";
/// File field carrying the main poster.
pub const MAIN_POSTER: &str = "event_main_poster";
/// Repeated file field carrying the photos.
pub const PHOTOS: &str = "event_photos";

/// Every field of the event form, decoded but not yet validated.
#[derive(Debug, Default)]
pub struct EventForm {
    /// Title, if sent.
    pub title: Option<String>,
    /// Host name, if sent.
    pub host_name: Option<String>,
    /// First day, if sent.
    pub start_date: Option<NaiveDate>,
    /// Last day, if sent.
    pub end_date: Option<NaiveDate>,
    /// Category, if sent.
    pub category: Option<EventCategory>,
    /// Description, if sent.
    pub description: Option<String>,
    /// Organizer count, if sent.
    pub total_organizer: Option<i32>,
    /// Participant count, if sent.
    pub total_participant: Option<i32>,
    /// Program count, if sent.
    pub total_program: Option<i32>,
    /// Attached files.
    pub media: EventMedia,
}

impl EventForm {
    /// Reads every part of the request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the body is not valid
    /// multipart or a field cannot be parsed.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == MAIN_POSTER || name == PHOTOS {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await?;
                form.attach(&name, UploadedFile::new(file_name, content_type, data));
            } else {
                let value = field.text().await?;
                form.set_text(&name, &value)?;
            }
        }

        Ok(form)
    }

    fn attach(&mut self, name: &str, file: UploadedFile) {
        if file.is_placeholder() {
            return;
        }
        if name == MAIN_POSTER {
            self.media.main_poster = Some(file);
        } else {
            self.media.photos.push(file);
        }
    }

    /// Stores one text part. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a malformed date, category
    /// or count.
    pub fn set_text(&mut self, name: &str, value: &str) -> Result<(), ApiError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        match name {
            TITLE => self.title = Some(trimmed.to_string()),
            HOST_NAME => self.host_name = Some(trimmed.to_string()),
            START_DATE => self.start_date = Some(parse_date(name, trimmed)?),
            END_DATE => self.end_date = Some(parse_date(name, trimmed)?),
            CATEGORY => {
                let category = trimmed
                    .parse::<EventCategory>()
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                self.category = Some(category);
            }
            DESCRIPTION => self.description = Some(value.to_string()),
            TOTAL_ORGANIZER => self.total_organizer = Some(parse_count(name, trimmed)?),
            TOTAL_PARTICIPANT => self.total_participant = Some(parse_count(name, trimmed)?),
            TOTAL_PROGRAM => self.total_program = Some(parse_count(name, trimmed)?),
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
        Ok(())
    }

    /// Builds a create payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingMandatoryFields`] unless title, host
    /// name and both dates are present.
    pub fn into_new_event(self) -> Result<(NewEvent, EventMedia), ApiError> {
        let (Some(title), Some(host_name), Some(start_date), Some(end_date)) =
            (self.title, self.host_name, self.start_date, self.end_date)
        else {
            return Err(ApiError::MissingMandatoryFields);
        };

        let mut event = NewEvent::new(title, host_name, start_date, end_date);
        event.category = self.category;
        event.description = self.description;
        event.total_organizer = self.total_organizer;
        event.total_participant = self.total_participant;
        event.total_program = self.total_program;
        Ok((event, self.media))
    }

    /// Builds an update payload. Every field is optional.
    #[must_use]
    pub fn into_patch(self) -> (EventPatch, EventMedia) {
        let patch = EventPatch {
            title: self.title,
            host_name: self.host_name,
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
            description: self.description,
            total_organizer: self.total_organizer,
            total_participant: self.total_participant,
            total_program: self.total_program,
            main_poster_url: None,
            photo_urls: None,
        };
        (patch, self.media)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::InvalidRequest(format!("{field} must be a date in YYYY-MM-DD format"))
    })
}

fn parse_count(field: &str, value: &str) -> Result<i32, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("{field} must be an integer")))
}
