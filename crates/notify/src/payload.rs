//! The event payload accepted by [`emit_event`](crate::NotificationEngine::emit_event).

use mentora_core::types::DbId;
use mentora_db::models::EventType;
use serde::{Deserialize, Serialize};

use crate::writer::NotificationContent;

/// Caller-supplied data accompanying an emitted event.
///
/// Constructed via [`EventPayload::new`] and enriched with the builder
/// methods. Everything is optional; an empty payload produces a
/// notification whose message falls back to the event type's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    /// Notification body text.
    pub message: Option<String>,

    /// Link for the notification to point at (e.g. the affected record).
    pub link: Option<String>,

    /// Free-form JSON carried opaquely into the notification's metadata.
    pub metadata: serde_json::Value,

    /// Optional related entity kind (e.g. `"contact"`, `"course"`).
    pub related_entity_type: Option<String>,

    /// Optional related entity database id.
    pub related_entity_id: Option<DbId>,
}

impl EventPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self {
            message: None,
            link: None,
            metadata: serde_json::Value::Object(Default::default()),
            related_entity_type: None,
            related_entity_id: None,
        }
    }

    /// Set the notification body text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the notification link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the opaque metadata payload.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach a related entity to the payload.
    pub fn with_related(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.related_entity_type = Some(entity_type.into());
        self.related_entity_id = Some(entity_id);
        self
    }

    /// Render the payload into the content written for every recipient.
    ///
    /// The title is the event type's display name; a missing message falls
    /// back to it as well. The related entity, when present, is folded into
    /// the metadata object so the inbox collaborator can deep-link.
    pub fn into_content(self, event_type: &EventType) -> NotificationContent {
        let mut metadata = match self.metadata {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => Default::default(),
            other => {
                // Non-object payloads are preserved under a fixed key.
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        if let Some(entity_type) = self.related_entity_type {
            metadata.insert("related_entity_type".to_string(), entity_type.into());
        }
        if let Some(entity_id) = self.related_entity_id {
            metadata.insert("related_entity_id".to_string(), entity_id.into());
        }

        NotificationContent {
            title: event_type.name.clone(),
            message: self.message.unwrap_or_else(|| event_type.name.clone()),
            link: self.link,
            metadata: serde_json::Value::Object(metadata),
        }
    }
}

impl Default for EventPayload {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event_type() -> EventType {
        EventType {
            id: 1,
            key: "contact_added".to_string(),
            name: "New contact added".to_string(),
            source_module: "contacts".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_payload_falls_back_to_event_name() {
        let content = EventPayload::new().into_content(&event_type());
        assert_eq!(content.title, "New contact added");
        assert_eq!(content.message, "New contact added");
        assert!(content.link.is_none());
        assert_eq!(content.metadata, serde_json::json!({}));
    }

    #[test]
    fn related_entity_is_folded_into_metadata() {
        let content = EventPayload::new()
            .with_message("Jane Doe was added")
            .with_related("contact", 99)
            .into_content(&event_type());
        assert_eq!(content.message, "Jane Doe was added");
        assert_eq!(content.metadata["related_entity_type"], "contact");
        assert_eq!(content.metadata["related_entity_id"], 99);
    }

    #[test]
    fn non_object_metadata_is_preserved_under_data_key() {
        let content = EventPayload::new()
            .with_metadata(serde_json::json!([1, 2, 3]))
            .into_content(&event_type());
        assert_eq!(content.metadata["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn object_metadata_keys_survive() {
        let content = EventPayload::new()
            .with_metadata(serde_json::json!({"course_id": 5}))
            .with_link("/courses/5")
            .into_content(&event_type());
        assert_eq!(content.metadata["course_id"], 5);
        assert_eq!(content.link.as_deref(), Some("/courses/5"));
    }
}
