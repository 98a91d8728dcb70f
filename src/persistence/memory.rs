//! In-memory event repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EventRepository;
use crate::domain::{Event, EventId, EventPatch, NewEvent};
use crate::error::ApiError;

/// Process-local repository with the same ordering and id semantics as the
/// PostgreSQL one. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryEventRepository {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    events: BTreeMap<EventId, Event>,
}

impl MemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.events.is_empty()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, ApiError> {
        let mut state = self.state.write().await;
        state.last_id = state.last_id.saturating_add(1);
        let stored = event.into_event(EventId::new(state.last_id));
        state.events.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Event>, ApiError> {
        let state = self.state.read().await;
        let mut events: Vec<&Event> = state.events.values().collect();
        events.sort_by_key(|e| (e.start_date, e.id));
        Ok(events
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, ApiError> {
        let mut state = self.state.write().await;
        Ok(state.events.get_mut(&id).map(|event| {
            event.apply(patch);
            event.clone()
        }))
    }

    async fn delete(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        Ok(self.state.write().await.events.remove(&id))
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
