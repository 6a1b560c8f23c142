//! Repository for the `routing_rules` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::routing_rule::RoutingRule;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, event_type_id, source_role, target_role, is_enabled, created_at, updated_at";

/// Provides read/write operations for routing rules.
pub struct RoutingRuleRepo;

impl RoutingRuleRepo {
    /// Resolve the enabled target roles for an event type and sender role.
    ///
    /// An empty result is a valid terminal state: the event was emitted but
    /// no one is routed.
    pub async fn routes_for(
        pool: &PgPool,
        event_type_id: DbId,
        source_role: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT target_role FROM routing_rules \
             WHERE event_type_id = $1 AND source_role = $2 AND is_enabled = true \
             ORDER BY target_role",
        )
        .bind(event_type_id)
        .bind(source_role)
        .fetch_all(pool)
        .await
    }

    /// Insert or update a routing rule.
    ///
    /// Uses `INSERT ... ON CONFLICT (event_type_id, source_role, target_role)
    /// DO UPDATE` so the at-most-one-rule-per-triple invariant is enforced by
    /// the unique index rather than application logic.
    pub async fn upsert(
        pool: &PgPool,
        event_type_id: DbId,
        source_role: &str,
        target_role: &str,
        is_enabled: bool,
    ) -> Result<RoutingRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO routing_rules (event_type_id, source_role, target_role, is_enabled) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (event_type_id, source_role, target_role) DO UPDATE SET \
                is_enabled = EXCLUDED.is_enabled, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoutingRule>(&query)
            .bind(event_type_id)
            .bind(source_role)
            .bind(target_role)
            .bind(is_enabled)
            .fetch_one(pool)
            .await
    }

    /// Enable or disable a routing rule.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_enabled(
        pool: &PgPool,
        id: DbId,
        is_enabled: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE routing_rules SET is_enabled = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_enabled)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all rules for an event type, enabled or not.
    pub async fn list_for_event_type(
        pool: &PgPool,
        event_type_id: DbId,
    ) -> Result<Vec<RoutingRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routing_rules \
             WHERE event_type_id = $1 \
             ORDER BY source_role, target_role"
        );
        sqlx::query_as::<_, RoutingRule>(&query)
            .bind(event_type_id)
            .fetch_all(pool)
            .await
    }
}
