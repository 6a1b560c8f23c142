//! Repository for the `rate_limit_policies` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::rate_limit_policy::RateLimitPolicy;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_type_id, cooldown_minutes, max_per_hour, max_per_day, \
                       is_active, created_at, updated_at";

/// Provides read/write operations for rate limit policies.
pub struct RateLimitPolicyRepo;

impl RateLimitPolicyRepo {
    /// Find the active policy for an event type.
    ///
    /// `None` means delivery is unlimited for that event type.
    pub async fn find_active_for_event_type(
        pool: &PgPool,
        event_type_id: DbId,
    ) -> Result<Option<RateLimitPolicy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rate_limit_policies \
             WHERE event_type_id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, RateLimitPolicy>(&query)
            .bind(event_type_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the policy for an event type.
    ///
    /// One policy per event type, enforced by the unique index on
    /// `event_type_id`; upserting reactivates an inactive policy.
    pub async fn upsert(
        pool: &PgPool,
        event_type_id: DbId,
        cooldown_minutes: i32,
        max_per_hour: i32,
        max_per_day: i32,
    ) -> Result<RateLimitPolicy, sqlx::Error> {
        let query = format!(
            "INSERT INTO rate_limit_policies \
                (event_type_id, cooldown_minutes, max_per_hour, max_per_day) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (event_type_id) DO UPDATE SET \
                cooldown_minutes = EXCLUDED.cooldown_minutes, \
                max_per_hour = EXCLUDED.max_per_hour, \
                max_per_day = EXCLUDED.max_per_day, \
                is_active = true, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RateLimitPolicy>(&query)
            .bind(event_type_id)
            .bind(cooldown_minutes)
            .bind(max_per_hour)
            .bind(max_per_day)
            .fetch_one(pool)
            .await
    }

    /// Activate or deactivate the policy for an event type.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_active(
        pool: &PgPool,
        event_type_id: DbId,
        is_active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rate_limit_policies SET is_active = $2, updated_at = NOW() \
             WHERE event_type_id = $1",
        )
        .bind(event_type_id)
        .bind(is_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
