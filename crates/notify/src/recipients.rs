//! Target role expansion.

use mentora_core::types::DbId;
use mentora_db::repositories::UserRepo;
use mentora_db::DbPool;

/// Expands target roles into concrete recipient user IDs.
pub struct RecipientResolver;

impl RecipientResolver {
    /// Resolve `target_roles` into active user IDs, deduplicated.
    ///
    /// The sender is excluded unconditionally, regardless of role
    /// membership: a sender can never notify themself through this path.
    pub async fn expand(
        pool: &DbPool,
        target_roles: &[String],
        sender_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if target_roles.is_empty() {
            return Ok(Vec::new());
        }
        UserRepo::ids_with_roles(pool, target_roles, sender_id).await
    }
}
