//! Multi-window rate limiting over the delivery log.

use chrono::Utc;
use mentora_core::types::DbId;
use mentora_db::models::RateLimitPolicy;
use mentora_db::repositories::{DeliveryLogRepo, RateLimitPolicyRepo};
use mentora_db::DbPool;
use sqlx::PgConnection;

/// Why a delivery was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// A delivery exists within the cooldown window.
    Cooldown,
    /// The rolling one-hour window already holds `max_per_hour` deliveries.
    HourlyCap,
    /// The rolling 24-hour window already holds `max_per_day` deliveries.
    DailyCap,
}

impl SuppressReason {
    /// Stable string form for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cooldown => "cooldown",
            Self::HourlyCap => "hourly_cap",
            Self::DailyCap => "daily_cap",
        }
    }
}

/// Outcome of evaluating the rate-limit gates for one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Deliver,
    Suppressed(SuppressReason),
}

/// Evaluates the cooldown, hourly-cap, and daily-cap gates.
///
/// The gates read only the append-only delivery log — never an in-memory
/// counter — so decisions survive process restarts and agree across
/// concurrent engine instances. [`evaluate`](RateLimiter::evaluate) takes a
/// connection rather than a pool because the writer runs it inside the
/// delivery transaction, after the per-pair advisory lock is held.
pub struct RateLimiter;

impl RateLimiter {
    /// Fetch the active policy for an event type, if any.
    ///
    /// `None` means all gates pass unconditionally.
    pub async fn policy_for(
        pool: &DbPool,
        event_type_id: DbId,
    ) -> Result<Option<RateLimitPolicy>, sqlx::Error> {
        RateLimitPolicyRepo::find_active_for_event_type(pool, event_type_id).await
    }

    /// Evaluate the three ANDed gates for one `(user, event type)` pair.
    pub async fn evaluate(
        conn: &mut PgConnection,
        user_id: DbId,
        event_type_id: DbId,
        policy: Option<&RateLimitPolicy>,
    ) -> Result<GateDecision, sqlx::Error> {
        let Some(policy) = policy.filter(|p| p.is_active) else {
            return Ok(GateDecision::Deliver);
        };

        let now = Utc::now();

        if policy.cooldown_minutes > 0 {
            let since = now - chrono::Duration::minutes(policy.cooldown_minutes as i64);
            if DeliveryLogRepo::exists_since(&mut *conn, user_id, event_type_id, since).await? {
                return Ok(GateDecision::Suppressed(SuppressReason::Cooldown));
            }
        }

        let hour_ago = now - chrono::Duration::hours(1);
        let hourly = DeliveryLogRepo::count_since(&mut *conn, user_id, event_type_id, hour_ago).await?;
        if hourly >= policy.max_per_hour as i64 {
            return Ok(GateDecision::Suppressed(SuppressReason::HourlyCap));
        }

        let day_ago = now - chrono::Duration::hours(24);
        let daily = DeliveryLogRepo::count_since(&mut *conn, user_id, event_type_id, day_ago).await?;
        if daily >= policy.max_per_day as i64 {
            return Ok(GateDecision::Suppressed(SuppressReason::DailyCap));
        }

        Ok(GateDecision::Deliver)
    }
}
