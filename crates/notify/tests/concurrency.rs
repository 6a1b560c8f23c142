//! The single-survivor property under concurrent emission.

mod common;

use std::sync::Arc;

use mentora_core::event_keys::EVENT_CONTACT_ADDED;
use mentora_core::roles::{ROLE_ADMIN, ROLE_PARTNER};
use mentora_db::repositories::{RateLimitPolicyRepo, RoutingRuleRepo};
use mentora_notify::{EngineConfig, EventPayload, NotificationEngine};
use sqlx::PgPool;

use common::{delivery_log_count, event_type, notification_count, seed_user};

/// Firing the same event for the same (user, event type) from N concurrent
/// callers with a cooldown active and no prior log entry must leave exactly
/// one surviving notification, never N. The advisory-locked transaction in
/// the writer is what closes the check-then-insert race.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_emissions_leave_a_single_survivor(pool: PgPool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let engine = Arc::new(NotificationEngine::new(pool.clone(), EngineConfig::default()));
    let sender = seed_user(&pool, "partner1", ROLE_PARTNER).await;
    seed_user(&pool, "admin1", ROLE_ADMIN).await;
    let contact_added = event_type(&pool, EVENT_CONTACT_ADDED).await;

    RoutingRuleRepo::upsert(&pool, contact_added.id, ROLE_PARTNER, ROLE_ADMIN, true).await?;
    RateLimitPolicyRepo::upsert(&pool, contact_added.id, 5, 10, 50).await?;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .emit_event(EVENT_CONTACT_ADDED, sender, ROLE_PARTNER, EventPayload::new())
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await?, "every concurrent emission is accepted");
    }

    assert_eq!(notification_count(&pool).await, 1);
    assert_eq!(delivery_log_count(&pool).await, 1);
    Ok(())
}

/// Same race, multiple recipients: each recipient independently ends up
/// with exactly one notification.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_fanout_is_exactly_once_per_recipient(pool: PgPool) -> anyhow::Result<()> {
    let engine = Arc::new(NotificationEngine::new(pool.clone(), EngineConfig::default()));
    let sender = seed_user(&pool, "partner1", ROLE_PARTNER).await;
    for i in 0..3 {
        seed_user(&pool, &format!("admin{i}"), ROLE_ADMIN).await;
    }
    let contact_added = event_type(&pool, EVENT_CONTACT_ADDED).await;

    RoutingRuleRepo::upsert(&pool, contact_added.id, ROLE_PARTNER, ROLE_ADMIN, true).await?;
    RateLimitPolicyRepo::upsert(&pool, contact_added.id, 5, 10, 50).await?;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .emit_event(EVENT_CONTACT_ADDED, sender, ROLE_PARTNER, EventPayload::new())
                .await
        }));
    }
    for handle in handles {
        handle.await?;
    }

    let per_user: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT user_id, COUNT(*) FROM notifications GROUP BY user_id ORDER BY user_id",
    )
    .fetch_all(&pool)
    .await?;
    assert_eq!(per_user.len(), 3);
    assert!(per_user.iter().all(|(_, count)| *count == 1));
    Ok(())
}
