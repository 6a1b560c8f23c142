//! Atomic notification write + delivery log append.

use mentora_core::types::DbId;
use mentora_db::models::{EventType, RateLimitPolicy};
use mentora_db::repositories::{DeliveryLogRepo, NotificationRepo};
use mentora_db::DbPool;

use crate::limiter::{GateDecision, RateLimiter, SuppressReason};

/// Rendered content written identically for every recipient of one event.
#[derive(Debug, Clone)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub metadata: serde_json::Value,
}

/// Result of one recipient's gate-check-then-write unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The notification was written; carries its ID.
    Delivered(DbId),
    /// A rate-limit gate rejected the delivery; nothing was written.
    Suppressed(SuppressReason),
}

/// The only component that writes `notifications` and `delivery_log`.
///
/// The gate check and both inserts form a single transaction serialized per
/// `(user_id, event_type_id)` by a transaction-scoped Postgres advisory
/// lock, so two concurrent emissions for the same pair cannot both pass a
/// stale gate check. The lock is released automatically at commit or
/// rollback, and it serializes across connections and processes, not just
/// within this one.
pub struct NotificationWriter;

impl NotificationWriter {
    /// Gate-check and deliver to a single recipient.
    ///
    /// On success exactly one notification row and exactly one delivery log
    /// row exist for this call; on suppression, zero of both.
    pub async fn deliver(
        pool: &DbPool,
        recipient_id: DbId,
        sender_id: DbId,
        event_type: &EventType,
        policy: Option<&RateLimitPolicy>,
        content: &NotificationContent,
    ) -> Result<DeliveryOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock key derives from the (recipient, event type) pair; all
        // writers for the same pair queue behind it until commit/rollback.
        let lock_key = format!("{}:{}", recipient_id, event_type.id);
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await?;

        match RateLimiter::evaluate(&mut tx, recipient_id, event_type.id, policy).await? {
            GateDecision::Suppressed(reason) => {
                tx.rollback().await?;
                Ok(DeliveryOutcome::Suppressed(reason))
            }
            GateDecision::Deliver => {
                let notification_id = NotificationRepo::create(
                    &mut *tx,
                    recipient_id,
                    sender_id,
                    event_type.id,
                    &content.title,
                    &content.message,
                    content.link.as_deref(),
                    &content.metadata,
                )
                .await?;
                DeliveryLogRepo::append(&mut *tx, recipient_id, event_type.id).await?;
                tx.commit().await?;
                Ok(DeliveryOutcome::Delivered(notification_id))
            }
        }
    }
}
