//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default suitable for a
//! local development stack; production deployments must override the
//! credentials.

use std::net::SocketAddr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Title reported by the OpenAPI document and the root endpoint.
    pub project_name: String,

    /// Path prefix all event routes are mounted under.
    pub api_prefix: String,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Object store settings.
    pub storage: StorageConfig,

    /// Origins allowed by the CORS policy.
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over the discrete fields.
    pub url: Option<String>,
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum idle connections in the pool.
    pub min_connections: u32,
    /// Timeout in seconds for acquiring a connection.
    pub connect_timeout_secs: u64,
    /// Apply embedded migrations at startup.
    pub run_migrations: bool,
}

/// S3-compatible object store settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Host and port of the object store (e.g. `localhost:9000`).
    pub endpoint: String,
    /// Access key id.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Bucket uploads are written to.
    pub bucket: String,
    /// Use HTTPS for the store and for generated URLs.
    pub secure: bool,
    /// Signing region. MinIO accepts any value.
    pub region: String,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// `AppConfig::from_lookup(|_| None)` yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is present but cannot be parsed
    /// as a [`SocketAddr`].
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let listen_addr: SocketAddr = env.string("LISTEN_ADDR", "0.0.0.0:8000").parse()?;

        let database = DatabaseConfig {
            url: env.get("DATABASE_URL").filter(|v| !v.is_empty()),
            host: env.string("POSTGRES_SERVER", "localhost"),
            port: env.parse("POSTGRES_PORT", 5432),
            user: env.string("POSTGRES_USER", "postgres"),
            password: env.string("POSTGRES_PASSWORD", "postgres"),
            name: env.string("POSTGRES_DB", "simple_event_builder"),
            max_connections: env.parse("DATABASE_MAX_CONNECTIONS", 10),
            min_connections: env.parse("DATABASE_MIN_CONNECTIONS", 1),
            connect_timeout_secs: env.parse("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            run_migrations: env.flag("DATABASE_RUN_MIGRATIONS", true),
        };

        let storage = StorageConfig {
            endpoint: env.string("MINIO_ENDPOINT", "localhost:9000"),
            access_key: env.string("MINIO_ACCESS_KEY", "minioadmin"),
            secret_key: env.string("MINIO_SECRET_KEY", "minioadmin"),
            bucket: env.string("MINIO_BUCKET_NAME", "event-images"),
            secure: env.flag("MINIO_SECURE", false),
            region: env.string("MINIO_REGION", "us-east-1"),
        };

        let cors_origins = env
            .get("BACKEND_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|| vec!["http://localhost:4200".to_string()]);

        Ok(Self {
            listen_addr,
            project_name: env.string("PROJECT_NAME", "Event Builder API"),
            api_prefix: normalize_prefix(&env.string("API_V1_STR", "/api/v1")),
            database,
            storage,
            cors_origins,
            max_upload_bytes: env.parse("MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
            log_json: env
                .get("LOG_FORMAT")
                .is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }
}

impl DatabaseConfig {
    /// Builds `sqlx` connect options from either the URL or the discrete
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is set but malformed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)),
        }
    }

    /// Timeout for acquiring a pooled connection.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl StorageConfig {
    /// URL scheme used for both the store client and public object URLs.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// Base URL of the object store, e.g. `http://localhost:9000`.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.endpoint)
    }
}

/// Parses an allowed-origins list. Accepts a JSON array
/// (`["http://a","http://b"]`) or a comma-separated string.
fn parse_origins(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let items: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).unwrap_or_default()
    } else {
        trimmed.split(',').map(str::to_string).collect()
    };
    items
        .into_iter()
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// Ensures the prefix starts with `/` and has no trailing slash.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Typed accessors over a key lookup.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parses a value as `T`, returning `default` on missing or invalid
    /// values.
    fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
    /// (case-insensitive). Returns `default` otherwise.
    fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            _ => default,
        }
    }
}
