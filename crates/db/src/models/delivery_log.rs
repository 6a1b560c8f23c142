//! Delivery log entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `delivery_log` table.
///
/// The sole input to rate-limit window calculations. Rows are never updated
/// or deleted by this workspace; retention jobs outside the engine own
/// pruning.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeliveryLogEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub event_type_id: DbId,
    pub delivered_at: Timestamp,
}
