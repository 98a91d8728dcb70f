//! Domain layer: the event entity, its identifier and its category.
//!
//! This module holds the server-side model shared by the persistence,
//! service and API layers, together with the validation rules that every
//! stored event satisfies.

pub mod category;
pub mod event;
pub mod event_id;

pub use category::EventCategory;
pub use event::{Event, EventPatch, NewEvent};
pub use event_id::EventId;
