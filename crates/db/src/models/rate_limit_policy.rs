//! Rate limit policy entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `rate_limit_policies` table.
///
/// One active policy per event type. Absence of a policy (or an inactive
/// one) means delivery is unlimited. A `cooldown_minutes` of zero disables
/// the cooldown gate; the hourly and daily caps are literal thresholds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RateLimitPolicy {
    pub id: DbId,
    pub event_type_id: DbId,
    pub cooldown_minutes: i32,
    pub max_per_hour: i32,
    pub max_per_day: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
