//! Repository for the `notification_preferences` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationPreference;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, event_type_id, is_enabled, created_at, updated_at";

/// Provides read/write operations for per-user notification preferences.
pub struct NotificationPreferenceRepo;

impl NotificationPreferenceRepo {
    /// Whether notifications of this event type are enabled for the user.
    ///
    /// Opt-out model: a missing preference row means enabled.
    pub async fn is_enabled(
        pool: &PgPool,
        user_id: DbId,
        event_type_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let enabled: Option<bool> = sqlx::query_scalar(
            "SELECT is_enabled FROM notification_preferences \
             WHERE user_id = $1 AND event_type_id = $2",
        )
        .bind(user_id)
        .bind(event_type_id)
        .fetch_optional(pool)
        .await?;
        Ok(enabled.unwrap_or(true))
    }

    /// Get the explicit preference row for a user and event type, if any.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        event_type_id: DbId,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 AND event_type_id = $2"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(event_type_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a preference.
    ///
    /// Uses `INSERT ... ON CONFLICT (user_id, event_type_id) DO UPDATE` to
    /// upsert in a single round-trip.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        event_type_id: DbId,
        is_enabled: bool,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences (user_id, event_type_id, is_enabled) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, event_type_id) DO UPDATE SET \
                is_enabled = EXCLUDED.is_enabled, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(event_type_id)
            .bind(is_enabled)
            .fetch_one(pool)
            .await
    }

    /// List all explicit preferences for a user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 \
             ORDER BY event_type_id"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
