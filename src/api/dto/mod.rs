//! Data Transfer Objects for REST request/response serialization.
//!
//! Full events are returned as [`crate::domain::Event`]; the types here
//! cover the list view, query strings and documentation-only form shapes.

pub mod common_dto;
pub mod event_dto;

pub use common_dto::*;
pub use event_dto::*;
