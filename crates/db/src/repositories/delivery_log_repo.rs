//! Repository for the append-only `delivery_log` table.

use mentora_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::delivery_log::DeliveryLogEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, event_type_id, delivered_at";

/// Provides append and window-query operations for the delivery log.
///
/// The log is the authoritative input for rate-limit decisions, so the
/// window queries accept any `PgExecutor`: the rate limiter runs them
/// inside the delivery transaction, where they observe committed rows from
/// every other engine instance.
pub struct DeliveryLogRepo;

impl DeliveryLogRepo {
    /// Append a delivery record, returning the generated ID.
    pub async fn append(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        event_type_id: DbId,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO delivery_log (user_id, event_type_id) \
             VALUES ($1, $2) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(event_type_id)
        .fetch_one(executor)
        .await
    }

    /// Whether any delivery exists at or after `since` for the pair.
    pub async fn exists_since(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        event_type_id: DbId,
        since: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM delivery_log \
                WHERE user_id = $1 AND event_type_id = $2 AND delivered_at >= $3)",
        )
        .bind(user_id)
        .bind(event_type_id)
        .bind(since)
        .fetch_one(executor)
        .await
    }

    /// Count deliveries at or after `since` for the pair.
    pub async fn count_since(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        event_type_id: DbId,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM delivery_log \
             WHERE user_id = $1 AND event_type_id = $2 AND delivered_at >= $3",
        )
        .bind(user_id)
        .bind(event_type_id)
        .bind(since)
        .fetch_one(executor)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// List deliveries for a user, newest first.
    ///
    /// Read-only view for auditing; the engine itself never lists the log.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DeliveryLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM delivery_log \
             WHERE user_id = $1 \
             ORDER BY delivered_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DeliveryLogEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
