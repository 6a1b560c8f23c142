//! Routing rule entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `routing_rules` table.
///
/// States that senders holding `source_role` may trigger notifications to
/// recipients holding `target_role` for the given event type. At most one
/// rule exists per `(event_type_id, source_role, target_role)` triple.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoutingRule {
    pub id: DbId,
    pub event_type_id: DbId,
    pub source_role: String,
    pub target_role: String,
    pub is_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
