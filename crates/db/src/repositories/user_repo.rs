//! Repository for the `users` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, role_id, is_active, created_at";

/// Provides read/write operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, role_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// IDs of active users holding any of the given roles.
    ///
    /// `exclude_user_id` is removed from the result unconditionally; the
    /// recipient resolver passes the sender so a sender can never notify
    /// themself.
    pub async fn ids_with_roles(
        pool: &PgPool,
        role_names: &[String],
        exclude_user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT u.id FROM users u \
             JOIN roles r ON u.role_id = r.id \
             WHERE r.name = ANY($1) AND u.is_active = true AND u.id <> $2 \
             ORDER BY u.id",
        )
        .bind(role_names)
        .bind(exclude_user_id)
        .fetch_all(pool)
        .await
    }

    /// Deactivate a user.
    ///
    /// Returns `true` if a row was updated. Inactive users are skipped by
    /// recipient resolution but keep their notification history.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
