//! Wiring of adapters, services and the HTTP router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::{AppConfig, StorageConfig};
use crate::persistence::{EventRepository, PgEventRepository, postgres};
use crate::service::EventService;
use crate::storage::{BlobStore, MediaStorage, ObjectStoreBackend};

/// Upper bound on the startup bucket check and creation.
const BUCKET_SETUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the service router with tracing, CORS and body-size layers.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let app = api::build_router(&config.api_prefix)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let app = match cors_layer(&config.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.with_state(state)
}

/// Connects the database and object store and assembles [`AppState`].
///
/// Neither dependency has to be reachable: the pool connects lazily and a
/// bucket that can be neither found nor created leaves uploads disabled.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is malformed.
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = postgres::connect_lazy(&config.database)?;

    if config.database.run_migrations {
        match postgres::run_migrations(&pool).await {
            Ok(()) => tracing::info!("database migrations applied"),
            Err(error) => tracing::error!(%error, "failed to apply database migrations"),
        }
    }

    let repository = PgEventRepository::new(pool);
    match repository.ping().await {
        Ok(()) => tracing::info!("database connection established"),
        Err(error) => tracing::error!(%error, "database is not reachable"),
    }

    let media = connect_storage(&config.storage).await;
    let service = EventService::new(Arc::new(repository), media);

    Ok(AppState::new(service, config.project_name.as_str()))
}

/// Creates the S3 client, then checks the bucket and creates it if missing.
async fn connect_storage(config: &StorageConfig) -> MediaStorage {
    let backend = match ObjectStoreBackend::s3(config) {
        Ok(backend) => backend,
        Err(error) => {
            tracing::error!(%error, "invalid object storage configuration; uploads disabled");
            return MediaStorage::unavailable(config);
        }
    };

    let media = MediaStorage::new(Arc::new(backend) as Arc<dyn BlobStore>, config);
    match tokio::time::timeout(BUCKET_SETUP_TIMEOUT, media.ensure_bucket()).await {
        Ok(Ok(())) => {
            tracing::info!(
                endpoint = %config.endpoint,
                bucket = %config.bucket,
                "object storage connected"
            );
            media
        }
        Ok(Err(error)) => {
            tracing::error!(
                bucket = %config.bucket,
                %error,
                "bucket setup failed; uploads disabled"
            );
            MediaStorage::unavailable(config)
        }
        Err(_) => {
            tracing::error!(bucket = %config.bucket, "bucket setup timed out; uploads disabled");
            MediaStorage::unavailable(config)
        }
    }
}

/// CORS policy for the configured origins. `*` allows any origin; an
/// empty list adds no CORS headers at all.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::MemoryEventRepository;

    fn test_router(lookup: &[(&str, &str)]) -> Router {
        let pairs: Vec<(String, String)> = lookup
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let Ok(config) = AppConfig::from_lookup(|key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        }) else {
            panic!("config must load");
        };
        let backend = Arc::new(ObjectStoreBackend::in_memory()) as Arc<dyn BlobStore>;
        let service = EventService::new(
            Arc::new(MemoryEventRepository::new()),
            MediaStorage::new(backend, &config.storage),
        );
        router(AppState::new(service, config.project_name.as_str()), &config)
    }

    fn get(uri: &str) -> Request<Body> {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        request
    }

    #[tokio::test]
    async fn event_routes_live_under_the_prefix() {
        let app = test_router(&[]);
        let Ok(response) = app.clone().oneshot(get("/api/v1/events")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(response) = app.oneshot(get("/events")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_prefix_mounts_events_at_root() {
        let app = test_router(&[("API_V1_STR", "/")]);
        let Ok(response) = app.oneshot(get("/events")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn error_code(response: Response) -> Option<i64> {
        let Ok(body) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let Ok(json) = serde_json::from_slice::<serde_json::Value>(&body) else {
            panic!("error body must be JSON");
        };
        json["error"]["code"].as_i64()
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_client_error() {
        let app = test_router(&[]);
        let Ok(response) = app.oneshot(get("/api/v1/events/abc")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, Some(1002));
    }

    #[tokio::test]
    async fn malformed_pagination_is_a_client_error() {
        let app = test_router(&[]);
        let Ok(response) = app.oneshot(get("/api/v1/events?limit=many")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, Some(1002));
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed() {
        let app = test_router(&[]);
        let Ok(request) = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:4200")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await;
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:4200")
        );
    }

    #[test]
    fn no_origins_means_no_cors_layer() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn listed_and_wildcard_origins_build_layers() {
        assert!(cors_layer(&["http://localhost:4200".to_string()]).is_some());
        assert!(cors_layer(&["*".to_string()]).is_some());
    }
}
