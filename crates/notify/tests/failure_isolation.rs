//! One recipient's failure or timeout never aborts delivery to the rest.

mod common;

use std::time::Duration;

use mentora_core::event_keys::EVENT_CONTACT_ADDED;
use mentora_core::roles::{ROLE_ADMIN, ROLE_PARTNER};
use mentora_db::repositories::RoutingRuleRepo;
use mentora_notify::{EngineConfig, EventPayload, NotificationEngine};
use sqlx::PgPool;

use common::{delivery_log_count, event_type, notification_count, seed_user};

/// Make notification inserts for one user fail, simulating a per-recipient
/// write error in the middle of a fan-out.
async fn reject_inserts_for(pool: &PgPool, user_id: i64) {
    let ddl = format!(
        "CREATE FUNCTION reject_notification_insert() RETURNS trigger AS $$ \
         BEGIN \
             IF NEW.user_id = {user_id} THEN \
                 RAISE EXCEPTION 'simulated write failure'; \
             END IF; \
             RETURN NEW; \
         END $$ LANGUAGE plpgsql"
    );
    sqlx::query(&ddl).execute(pool).await.unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_notification_insert BEFORE INSERT ON notifications \
         FOR EACH ROW EXECUTE FUNCTION reject_notification_insert()",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Make notification inserts for one user stall, so that recipient's
/// delivery exceeds the engine's per-recipient timeout.
async fn stall_inserts_for(pool: &PgPool, user_id: i64) {
    let ddl = format!(
        "CREATE FUNCTION stall_notification_insert() RETURNS trigger AS $$ \
         BEGIN \
             IF NEW.user_id = {user_id} THEN \
                 PERFORM pg_sleep(5); \
             END IF; \
             RETURN NEW; \
         END $$ LANGUAGE plpgsql"
    );
    sqlx::query(&ddl).execute(pool).await.unwrap();
    sqlx::query(
        "CREATE TRIGGER stall_notification_insert BEFORE INSERT ON notifications \
         FOR EACH ROW EXECUTE FUNCTION stall_notification_insert()",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_recipient_does_not_abort_the_rest(pool: PgPool) -> anyhow::Result<()> {
    let engine = NotificationEngine::new(pool.clone(), EngineConfig::default());
    let sender = seed_user(&pool, "partner1", ROLE_PARTNER).await;
    let admin1 = seed_user(&pool, "admin1", ROLE_ADMIN).await;
    let failing = seed_user(&pool, "admin2", ROLE_ADMIN).await;
    let admin3 = seed_user(&pool, "admin3", ROLE_ADMIN).await;
    let contact_added = event_type(&pool, EVENT_CONTACT_ADDED).await;

    RoutingRuleRepo::upsert(&pool, contact_added.id, ROLE_PARTNER, ROLE_ADMIN, true).await?;
    reject_inserts_for(&pool, failing).await;

    let accepted = engine
        .emit_event(EVENT_CONTACT_ADDED, sender, ROLE_PARTNER, EventPayload::new())
        .await;

    // The emission as a whole is still accepted.
    assert!(accepted);

    // The other recipients each received exactly one notification.
    let per_user: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT user_id, COUNT(*) FROM notifications GROUP BY user_id ORDER BY user_id",
    )
    .fetch_all(&pool)
    .await?;
    assert_eq!(per_user, vec![(admin1, 1), (admin3, 1)]);

    // The failing recipient's transaction rolled back whole: no
    // notification and no delivery log entry.
    let failed_log: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM delivery_log WHERE user_id = $1")
            .bind(failing)
            .fetch_one(&pool)
            .await?;
    assert_eq!(failed_log, 0);
    assert_eq!(delivery_log_count(&pool).await, 2);
    Ok(())
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn timed_out_recipient_does_not_abort_the_rest(pool: PgPool) -> anyhow::Result<()> {
    let config = EngineConfig {
        recipient_timeout: Duration::from_millis(500),
        ..EngineConfig::default()
    };
    let engine = NotificationEngine::new(pool.clone(), config);
    let sender = seed_user(&pool, "partner1", ROLE_PARTNER).await;
    let admin1 = seed_user(&pool, "admin1", ROLE_ADMIN).await;
    let stalled = seed_user(&pool, "admin2", ROLE_ADMIN).await;
    let contact_added = event_type(&pool, EVENT_CONTACT_ADDED).await;

    RoutingRuleRepo::upsert(&pool, contact_added.id, ROLE_PARTNER, ROLE_ADMIN, true).await?;
    stall_inserts_for(&pool, stalled).await;

    let accepted = engine
        .emit_event(EVENT_CONTACT_ADDED, sender, ROLE_PARTNER, EventPayload::new())
        .await;

    assert!(accepted);

    // The fast recipient is unaffected; the stalled one's uncommitted
    // insert never becomes visible.
    let recipients: Vec<i64> = sqlx::query_scalar("SELECT user_id FROM notifications")
        .fetch_all(&pool)
        .await?;
    assert_eq!(recipients, vec![admin1]);
    assert_eq!(notification_count(&pool).await, 1);
    Ok(())
}
