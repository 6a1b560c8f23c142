//! Top-level event emission and fan-out.

use futures::StreamExt;
use mentora_core::event_keys::validate_event_key;
use mentora_core::types::DbId;
use mentora_db::models::{EventType, RateLimitPolicy};
use mentora_db::repositories::{NotificationPreferenceRepo, RoutingRuleRepo};
use mentora_db::DbPool;

use crate::config::EngineConfig;
use crate::limiter::RateLimiter;
use crate::payload::EventPayload;
use crate::recipients::RecipientResolver;
use crate::registry::EventTypeRegistry;
use crate::writer::{DeliveryOutcome, NotificationContent, NotificationWriter};

/// The notification fan-out engine.
///
/// Constructed once by the host application and shared via `Arc`. All
/// routing, preference, and rate-limit state lives in the database; the
/// engine itself holds only the pool, configuration, and the event type
/// cache, so any number of instances (including in separate processes) stay
/// consistent.
pub struct NotificationEngine {
    pool: DbPool,
    config: EngineConfig,
    registry: EventTypeRegistry,
}

impl NotificationEngine {
    /// Create an engine over the given pool and configuration.
    pub fn new(pool: DbPool, config: EngineConfig) -> Self {
        let registry = EventTypeRegistry::new(config.cache_ttl);
        Self {
            pool,
            config,
            registry,
        }
    }

    /// The event type registry, exposed so configuration mutators can
    /// invalidate cached entries.
    pub fn registry(&self) -> &EventTypeRegistry {
        &self.registry
    }

    /// Emit a domain event and fan it out to eligible recipients.
    ///
    /// Returns whether the event was *accepted*: `true` covers valid
    /// no-ops (no routing rule, every recipient suppressed or opted out);
    /// `false` means the event key is malformed, unknown, or inactive, or
    /// the store failed
    /// before fan-out began. Per-recipient failures are logged and never
    /// affect the result, so this is safe to call inline from unrelated
    /// business logic.
    pub async fn emit_event(
        &self,
        event_key: &str,
        sender_id: DbId,
        sender_role: &str,
        payload: EventPayload,
    ) -> bool {
        // A malformed key can never match an `event_types` row, so reject
        // it before touching the cache or the database.
        if let Err(e) = validate_event_key(event_key) {
            tracing::warn!(error = %e, event_key, "Malformed event key, skipping emission");
            return false;
        }

        let event_type = match self.registry.resolve(&self.pool, event_key).await {
            Ok(Some(event_type)) => event_type,
            Ok(None) => {
                tracing::warn!(event_key, "Unknown or inactive event type, skipping emission");
                return false;
            }
            Err(e) => {
                tracing::error!(error = %e, event_key, "Event type lookup failed");
                return false;
            }
        };

        let target_roles =
            match RoutingRuleRepo::routes_for(&self.pool, event_type.id, sender_role).await {
                Ok(roles) => roles,
                Err(e) => {
                    tracing::error!(error = %e, event_key, "Routing rule lookup failed");
                    return false;
                }
            };
        if target_roles.is_empty() {
            tracing::info!(event_key, sender_role, "No enabled routing rule, nothing to deliver");
            return true;
        }

        let candidates =
            match RecipientResolver::expand(&self.pool, &target_roles, sender_id).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::error!(error = %e, event_key, "Recipient expansion failed");
                    return false;
                }
            };
        if candidates.is_empty() {
            tracing::info!(event_key, "Target roles have no members, nothing to deliver");
            return true;
        }

        let policy = match RateLimiter::policy_for(&self.pool, event_type.id).await {
            Ok(policy) => policy,
            Err(e) => {
                tracing::error!(error = %e, event_key, "Rate limit policy lookup failed");
                return false;
            }
        };

        let content = payload.into_content(&event_type);
        let event_type = &event_type;
        let policy = policy.as_ref();
        let content = &content;

        // Each recipient is an independent unit of work: failures and
        // timeouts are caught inside deliver_to, so one bad recipient
        // cannot abort delivery to the rest.
        futures::stream::iter(candidates)
            .for_each_concurrent(self.config.max_concurrent_deliveries, |user_id| async move {
                self.deliver_to(user_id, sender_id, event_type, policy, content)
                    .await;
            })
            .await;

        true
    }

    /// Preference-check, gate-check, and write for one recipient.
    ///
    /// Never propagates an error; every outcome is logged here.
    async fn deliver_to(
        &self,
        user_id: DbId,
        sender_id: DbId,
        event_type: &EventType,
        policy: Option<&RateLimitPolicy>,
        content: &NotificationContent,
    ) {
        let attempt = self.try_deliver(user_id, sender_id, event_type, policy, content);
        match tokio::time::timeout(self.config.recipient_timeout, attempt).await {
            Ok(Ok(Some(DeliveryOutcome::Delivered(notification_id)))) => {
                tracing::debug!(
                    user_id,
                    notification_id,
                    event_key = %event_type.key,
                    "Notification delivered"
                );
            }
            Ok(Ok(Some(DeliveryOutcome::Suppressed(reason)))) => {
                tracing::debug!(
                    user_id,
                    event_key = %event_type.key,
                    reason = reason.as_str(),
                    "Delivery suppressed by rate limit"
                );
            }
            Ok(Ok(None)) => {
                tracing::debug!(
                    user_id,
                    event_key = %event_type.key,
                    "Recipient has opted out of this event type"
                );
            }
            Ok(Err(e)) => {
                tracing::error!(
                    error = %e,
                    user_id,
                    event_key = %event_type.key,
                    "Failed to deliver notification"
                );
            }
            Err(_) => {
                tracing::error!(
                    user_id,
                    event_key = %event_type.key,
                    timeout_secs = self.config.recipient_timeout.as_secs(),
                    "Recipient delivery timed out"
                );
            }
        }
    }

    /// Returns `Ok(None)` when the recipient opted out, otherwise the
    /// writer's outcome.
    ///
    /// The preference check runs before the rate limiter so opted-out users
    /// never consume rate-limit budget.
    async fn try_deliver(
        &self,
        user_id: DbId,
        sender_id: DbId,
        event_type: &EventType,
        policy: Option<&RateLimitPolicy>,
        content: &NotificationContent,
    ) -> Result<Option<DeliveryOutcome>, sqlx::Error> {
        if !NotificationPreferenceRepo::is_enabled(&self.pool, user_id, event_type.id).await? {
            return Ok(None);
        }

        NotificationWriter::deliver(&self.pool, user_id, sender_id, event_type, policy, content)
            .await
            .map(Some)
    }
}
