//! Shared fixtures for the engine integration tests.
//!
//! The migrations seed the well-known roles and event types; these helpers
//! add users and inspect the tables the engine writes.

#![allow(dead_code)]

use mentora_core::types::DbId;
use mentora_db::models::{CreateUser, EventType};
use mentora_db::repositories::{EventTypeRepo, RoleRepo, UserRepo};
use mentora_db::DbPool;

/// Create an active user holding the given seeded role, returning the ID.
pub async fn seed_user(pool: &DbPool, username: &str, role_name: &str) -> DbId {
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .unwrap()
        .expect("role is seeded by migrations");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.test"),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    user.id
}

/// Look up a seeded event type by key.
pub async fn event_type(pool: &DbPool, key: &str) -> EventType {
    EventTypeRepo::find_by_key(pool, key)
        .await
        .unwrap()
        .expect("event type is seeded by migrations")
}

/// Total number of notification rows.
pub async fn notification_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Total number of delivery log rows.
pub async fn delivery_log_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM delivery_log")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert a delivery log row `minutes_ago` in the past.
///
/// Lets window tests position prior deliveries precisely without sleeping.
pub async fn backdate_delivery(pool: &DbPool, user_id: DbId, event_type_id: DbId, minutes_ago: i32) {
    sqlx::query(
        "INSERT INTO delivery_log (user_id, event_type_id, delivered_at) \
         VALUES ($1, $2, NOW() - make_interval(mins => $3))",
    )
    .bind(user_id)
    .bind(event_type_id)
    .bind(minutes_ago)
    .execute(pool)
    .await
    .unwrap();
}
