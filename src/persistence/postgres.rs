//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;

use super::EventRepository;
use super::models::{EVENT_COLUMNS, EventRow};
use crate::config::DatabaseConfig;
use crate::domain::{Event, EventId, EventPatch, NewEvent};
use crate::error::ApiError;

/// Builds a connection pool without opening a connection yet.
///
/// Connections are established on first use, so an unreachable database
/// does not prevent the server from starting.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is set but malformed.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy_with(options))
}

/// Applies the embedded migrations in `./migrations`.
///
/// # Errors
///
/// Returns a [`MigrateError`] if the database is unreachable or a
/// migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// PostgreSQL-backed event repository using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, ApiError> {
        let sql = format!(
            "INSERT INTO events (title, host_name, start_date, end_date, category, description, \
             total_organizer, total_participant, total_program, main_poster_url, photo_urls) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event.title)
            .bind(event.host_name)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.category)
            .bind(event.description)
            .bind(event.total_organizer)
            .bind(event.total_participant)
            .bind(event.total_program)
            .bind(event.main_poster_url)
            .bind(event.photo_urls)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Event::from))
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Event>, ApiError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date ASC, id ASC OFFSET $1 LIMIT $2"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(i64::from(skip))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn update(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, ApiError> {
        // Absent fields bind NULL and keep the stored value.
        let sql = format!(
            "UPDATE events SET \
             title = COALESCE($2, title), \
             host_name = COALESCE($3, host_name), \
             start_date = COALESCE($4, start_date), \
             end_date = COALESCE($5, end_date), \
             category = COALESCE($6, category), \
             description = COALESCE($7, description), \
             total_organizer = COALESCE($8, total_organizer), \
             total_participant = COALESCE($9, total_participant), \
             total_program = COALESCE($10, total_program), \
             main_poster_url = COALESCE($11, main_poster_url), \
             photo_urls = COALESCE($12, photo_urls) \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.host_name)
            .bind(patch.start_date)
            .bind(patch.end_date)
            .bind(patch.category)
            .bind(patch.description)
            .bind(patch.total_organizer)
            .bind(patch.total_participant)
            .bind(patch.total_program)
            .bind(patch.main_poster_url)
            .bind(patch.photo_urls)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Event::from))
    }

    async fn delete(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        let sql = format!("DELETE FROM events WHERE id = $1 RETURNING {EVENT_COLUMNS}");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Event::from))
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
