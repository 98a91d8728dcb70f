//! End-to-end tests over HTTP against in-memory adapters.

#![allow(clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use event_builder::app;
use event_builder::app_state::AppState;
use event_builder::config::AppConfig;
use event_builder::persistence::MemoryEventRepository;
use event_builder::service::EventService;
use event_builder::storage::{BlobStore, MediaStorage, ObjectStoreBackend};

struct TestApp {
    base: String,
    client: reqwest::Client,
    store: Arc<InMemory>,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn create(&self, form: Form) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url("/api/v1/events"))
            .multipart(form)
            .send()
            .await
            .expect("request sent");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("request sent");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    /// Returns `true` if the object behind a public URL exists.
    async fn stored(&self, url: &str) -> bool {
        let key = url.rsplit('/').next().expect("url has a key");
        self.store.head(&Path::from(key)).await.is_ok()
    }
}

async fn spawn_app(storage_available: bool) -> TestApp {
    let config = AppConfig::from_lookup(|_| None).expect("default config");
    let store = Arc::new(InMemory::new());

    let media = if storage_available {
        let backend = ObjectStoreBackend::new(Arc::clone(&store) as Arc<dyn ObjectStore>);
        MediaStorage::new(Arc::new(backend) as Arc<dyn BlobStore>, &config.storage)
    } else {
        MediaStorage::unavailable(&config.storage)
    };
    let service = EventService::new(Arc::new(MemoryEventRepository::new()), media);
    let state = AppState::new(service, config.project_name.as_str());
    let router = app::router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    TestApp {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        store,
    }
}

fn base_form(title: &str, start: &str, end: &str) -> Form {
    Form::new()
        .text("event_title", title.to_string())
        .text("event_host_name", "Science Club")
        .text("event_start_date", start.to_string())
        .text("event_end_date", end.to_string())
}

fn image(name: &str, mime: &str, body: &'static [u8]) -> Part {
    Part::bytes(body)
        .file_name(name.to_string())
        .mime_str(mime)
        .expect("valid mime")
}

#[tokio::test]
async fn create_with_media_then_fetch() {
    let app = spawn_app(true).await;
    let form = base_form("Robotics Expo", "2025-06-01", "2025-06-03")
        .text("event_category", "Technology")
        .text("event_description", "Robots everywhere")
        .text("total_participant", "150")
        .part("event_main_poster", image("poster.png", "image/png", b"png"))
        .part("event_photos", image("one.jpg", "image/jpeg", b"one"))
        .part("event_photos", image("two.jpg", "image/jpeg", b"two"));

    let (status, created) = app.create(form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["event_title"], "Robotics Expo");
    assert_eq!(created["event_category"], "Technology");
    assert_eq!(created["total_participant"], 150);

    let poster = created["event_main_poster_url"]
        .as_str()
        .expect("poster url");
    assert!(poster.starts_with("http://localhost:9000/event-images/"));
    assert!(poster.ends_with(".png"));
    assert!(app.stored(poster).await);

    let photos = created["event_photos_urls"].as_array().expect("photo list");
    assert_eq!(photos.len(), 2);
    for photo in photos {
        let url = photo.as_str().expect("photo url");
        assert!(url.ends_with(".jpg"));
        assert!(app.stored(url).await);
    }

    let id = created["id"].as_i64().expect("id");
    let (status, fetched) = app.get(&format!("/api/v1/events/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_mandatory_field_is_rejected() {
    let app = spawn_app(true).await;
    let form = Form::new()
        .text("event_title", "No Host")
        .text("event_start_date", "2025-06-01")
        .text("event_end_date", "2025-06-01");

    let (status, body) = app.create(form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    assert_eq!(body["error"]["message"], "Mandatory fields are missing.");
}

#[tokio::test]
async fn malformed_and_inverted_dates_are_rejected() {
    let app = spawn_app(true).await;

    let (status, body) = app
        .create(base_form("Bad Date", "June first", "2025-06-01"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);

    let (status, body) = app
        .create(base_form("Backwards", "2025-06-05", "2025-06-01"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1003);
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let app = spawn_app(true).await;
    let (status, body) = app.get("/api/v1/events/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
    assert_eq!(body["error"]["message"], "Event not found");
}

#[tokio::test]
async fn list_is_ordered_and_paginated() {
    let app = spawn_app(true).await;
    for (title, day) in [
        ("Third", "2025-03-20"),
        ("First", "2025-03-01"),
        ("Second", "2025-03-10"),
    ] {
        let (status, _) = app.create(base_form(title, day, day)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = app.get("/api/v1/events/").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = all
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|e| e["event_title"].as_str())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert!(all[0].get("event_photos_urls").is_none());

    let (_, page) = app.get("/api/v1/events?skip=1&limit=1").await;
    let page = page.as_array().expect("list");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["event_title"], "Second");
}

#[tokio::test]
async fn update_replaces_photos_and_keeps_other_fields() {
    let app = spawn_app(true).await;
    let form = base_form("Chess Open", "2025-07-01", "2025-07-02")
        .text("total_organizer", "4")
        .part("event_photos", image("old.jpg", "image/jpeg", b"old"));
    let (_, created) = app.create(form).await;
    let id = created["id"].as_i64().expect("id");

    let patch = Form::new()
        .text("event_title", "Chess Open 2025")
        .part("event_photos", image("new1.jpg", "image/jpeg", b"n1"))
        .part("event_photos", image("new2.jpg", "image/jpeg", b"n2"));
    let response = app
        .client
        .put(app.url(&format!("/api/v1/events/{id}")))
        .multipart(patch)
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("json body");

    assert_eq!(updated["event_title"], "Chess Open 2025");
    assert_eq!(updated["event_host_name"], "Science Club");
    assert_eq!(updated["total_organizer"], 4);
    let photos = updated["event_photos_urls"].as_array().expect("photos");
    assert_eq!(photos.len(), 2);
    assert_ne!(photos[0], created["event_photos_urls"][0]);

    // No files sent: the photo list stays as it is.
    let response = app
        .client
        .put(app.url(&format!("/api/v1/events/{id}")))
        .multipart(Form::new().text("event_description", "Rapid format"))
        .send()
        .await
        .expect("request sent");
    let again: Value = response.json().await.expect("json body");
    assert_eq!(again["event_photos_urls"], updated["event_photos_urls"]);
    assert_eq!(again["event_description"], "Rapid format");
}

#[tokio::test]
async fn update_of_unknown_event_is_not_found() {
    let app = spawn_app(true).await;
    let response = app
        .client
        .put(app.url("/api/v1/events/99"))
        .multipart(Form::new().text("event_title", "Ghost"))
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_event_then_it_is_gone() {
    let app = spawn_app(true).await;
    let form = base_form("Book Fair", "2025-08-01", "2025-08-01")
        .part("event_main_poster", image("fair.png", "image/png", b"fair"));
    let (_, created) = app.create(form).await;
    let id = created["id"].as_i64().expect("id");

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/events/{id}")))
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Value = response.json().await.expect("json body");
    assert_eq!(deleted, created);

    let (status, _) = app.get(&format!("/api/v1/events/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let poster = created["event_main_poster_url"].as_str().expect("poster");
    assert!(app.stored(poster).await);
}

#[tokio::test]
async fn gallery_includes_photo_urls() {
    let app = spawn_app(true).await;
    let form = base_form("Photo Walk", "2025-05-05", "2025-05-05")
        .part("event_photos", image("walk.jpg", "image/jpeg", b"walk"));
    let _ = app.create(form).await;
    let _ = app
        .create(base_form("Quiet Reading", "2025-05-01", "2025-05-01"))
        .await;

    let (status, gallery) = app.get("/api/v1/events/gallery/all").await;
    assert_eq!(status, StatusCode::OK);
    let gallery = gallery.as_array().expect("gallery");
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0]["event_title"], "Quiet Reading");
    assert_eq!(gallery[0]["event_photos_urls"], Value::Array(Vec::new()));
    assert_eq!(
        gallery[1]["event_photos_urls"]
            .as_array()
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn uploads_fail_fast_when_storage_is_unavailable() {
    let app = spawn_app(false).await;

    let with_file = base_form("Debate Cup", "2025-10-01", "2025-10-02")
        .part("event_main_poster", image("cup.png", "image/png", b"cup"));
    let (status, body) = app.create(with_file).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], 3003);

    let (status, _) = app
        .create(base_form("Debate Cup", "2025-10-01", "2025-10-02"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = app.get("/api/v1/events").await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn empty_file_inputs_are_ignored() {
    let app = spawn_app(true).await;
    let form = base_form("Open Day", "2025-04-01", "2025-04-01")
        .part("event_main_poster", Part::bytes(Vec::new()).file_name(""));
    let (status, created) = app.create(form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["event_main_poster_url"].is_null());
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = spawn_app(false).await;

    let (status, root) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["message"], "Welcome to the Event Builder API");

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "up");
    assert_eq!(health["storage"], "unavailable");
}
