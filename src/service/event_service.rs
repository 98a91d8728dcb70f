//! Event service: validation, uploads and persistence for events.

use std::sync::Arc;

use crate::domain::{Event, EventId, EventPatch, NewEvent};
use crate::error::ApiError;
use crate::persistence::{EventRepository, MAX_PAGE_SIZE};
use crate::storage::{EventMedia, MediaStorage, StorageError, StoredMedia, UploadedFile};

/// Orchestration layer for all event operations.
///
/// Create and update run in two phases: files are uploaded first, then the
/// row is written with the resulting URLs. If the write fails, the objects
/// uploaded by that call are deleted again.
///
/// A failed poster upload aborts the operation. A failed photo upload is
/// logged and that photo is skipped.
#[derive(Debug, Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
    media: MediaStorage,
}

/// Objects written while handling one request.
#[derive(Debug, Default)]
struct Uploads {
    poster_url: Option<String>,
    photo_urls: Vec<String>,
    written: Vec<StoredMedia>,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>, media: MediaStorage) -> Self {
        Self { repository, media }
    }

    /// Returns the upload adapter.
    #[must_use]
    pub fn media(&self) -> &MediaStorage {
        &self.media
    }

    /// Returns the event repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn EventRepository> {
        &self.repository
    }

    /// Creates an event, uploading its poster and photos first.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, [`ApiError::UploadFailed`]
    /// if the poster cannot be stored, [`ApiError::StorageUnavailable`] if
    /// files were sent while the object store is down, and
    /// [`ApiError::Persistence`] on database failure.
    pub async fn create_event(
        &self,
        mut event: NewEvent,
        media: EventMedia,
    ) -> Result<Event, ApiError> {
        event.validate()?;

        let uploads = self.upload(&media).await?;
        event.main_poster_url = uploads.poster_url;
        event.photo_urls = uploads.photo_urls;

        match self.repository.create(event).await {
            Ok(created) => {
                tracing::info!(
                    event_id = %created.id,
                    photos = created.photo_urls.len(),
                    has_poster = created.main_poster_url.is_some(),
                    "event created"
                );
                Ok(created)
            }
            Err(err) => {
                self.media.discard(&uploads.written).await;
                Err(err)
            }
        }
    }

    /// Applies a partial update, uploading any new poster and photos first.
    ///
    /// A new poster replaces the stored URL. If at least one new photo was
    /// stored, the whole photo list is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if the event does not exist,
    /// plus the errors of [`EventService::create_event`].
    pub async fn update_event(
        &self,
        id: EventId,
        mut patch: EventPatch,
        media: EventMedia,
    ) -> Result<Event, ApiError> {
        let current = self.get_event(id).await?;
        patch.validate_against(&current)?;

        let uploads = self.upload(&media).await?;
        if uploads.poster_url.is_some() {
            patch.main_poster_url = uploads.poster_url;
        }
        if !uploads.photo_urls.is_empty() {
            patch.photo_urls = Some(uploads.photo_urls);
        }

        match self.repository.update(id, patch).await {
            Ok(Some(updated)) => {
                tracing::info!(event_id = %id, "event updated");
                Ok(updated)
            }
            Ok(None) => {
                self.media.discard(&uploads.written).await;
                Err(ApiError::EventNotFound(id))
            }
            Err(err) => {
                self.media.discard(&uploads.written).await;
                Err(err)
            }
        }
    }

    /// Returns a single event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.repository
            .get(id)
            .await?
            .ok_or(ApiError::EventNotFound(id))
    }

    /// Lists events by ascending start date. `limit` is capped at 1000;
    /// a `limit` of 0 returns no events.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_events(&self, skip: u32, limit: u32) -> Result<Vec<Event>, ApiError> {
        self.repository
            .list(skip, limit.min(MAX_PAGE_SIZE))
            .await
    }

    /// Returns every event for the gallery view, capped at 1000.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn gallery(&self) -> Result<Vec<Event>, ApiError> {
        self.repository.list(0, MAX_PAGE_SIZE).await
    }

    /// Deletes an event and returns its last state. Uploaded objects stay
    /// in the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if the event does not exist.
    pub async fn delete_event(&self, id: EventId) -> Result<Event, ApiError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or(ApiError::EventNotFound(id))?;
        tracing::info!(event_id = %id, "event deleted");
        Ok(deleted)
    }

    /// Uploads the poster, then each photo in order.
    async fn upload(&self, media: &EventMedia) -> Result<Uploads, ApiError> {
        let mut uploads = Uploads::default();

        if let Some(poster) = &media.main_poster {
            let stored = self.media.upload(poster).await.map_err(|error| {
                tracing::error!(file_name = ?poster.file_name, %error, "main poster upload failed");
                ApiError::from(error)
            })?;
            uploads.poster_url = Some(stored.url.clone());
            uploads.written.push(stored);
        }

        for photo in &media.photos {
            match self.media.upload(photo).await {
                Ok(stored) => {
                    uploads.photo_urls.push(stored.url.clone());
                    uploads.written.push(stored);
                }
                Err(StorageError::Unavailable) => {
                    self.media.discard(&uploads.written).await;
                    return Err(ApiError::StorageUnavailable);
                }
                Err(error) => skip_photo(photo, &error),
            }
        }

        Ok(uploads)
    }
}

fn skip_photo(photo: &UploadedFile, error: &StorageError) {
    tracing::warn!(
        file_name = ?photo.file_name,
        %error,
        "could not upload event photo, skipping it"
    );
}
