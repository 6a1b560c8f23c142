//! Event type entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_types` lookup table.
///
/// `key` is the stable string business logic emits (e.g. `"contact_added"`);
/// `name` is the human-readable label used as the notification title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventType {
    pub id: DbId,
    pub key: String,
    pub name: String,
    pub source_module: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
