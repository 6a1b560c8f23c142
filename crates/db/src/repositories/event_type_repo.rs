//! Repository for the `event_types` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::event_type::EventType;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, name, source_module, is_active, created_at, updated_at";

/// Provides read/write operations for event types.
pub struct EventTypeRepo;

impl EventTypeRepo {
    /// Find an event type by its stable key (e.g. `"contact_added"`).
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE key = $1");
        sqlx::query_as::<_, EventType>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Find an event type by key, returning `None` unless it is active.
    ///
    /// The emission path uses this so that disabled event types behave
    /// exactly like unknown ones.
    pub async fn find_active_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE key = $1 AND is_active = true");
        sqlx::query_as::<_, EventType>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Find an event type by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE id = $1");
        sqlx::query_as::<_, EventType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new event type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        key: &str,
        name: &str,
        source_module: &str,
    ) -> Result<EventType, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_types (key, name, source_module) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventType>(&query)
            .bind(key)
            .bind(name)
            .bind(source_module)
            .fetch_one(pool)
            .await
    }

    /// Enable or disable an event type.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE event_types SET is_active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all event types ordered by source module then key.
    pub async fn list(pool: &PgPool) -> Result<Vec<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types ORDER BY source_module, key");
        sqlx::query_as::<_, EventType>(&query).fetch_all(pool).await
    }
}
