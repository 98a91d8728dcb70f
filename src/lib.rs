//! # event-builder
//!
//! REST backend for creating and browsing events with a main poster and a
//! photo gallery.
//!
//! Event records live in PostgreSQL; posters and photos are written to an
//! S3-compatible object store (MinIO in development) and referenced by
//! their public URLs.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, multipart forms)
//!     │
//!     ├── REST Handlers + form decoding (api/)
//!     │
//!     ├── EventService (service/)
//!     │
//!     ├── EventRepository (persistence/) ── PostgreSQL
//!     └── MediaStorage (storage/) ───────── S3 / MinIO
//! ```

pub mod api;
pub mod app;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
