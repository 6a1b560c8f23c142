//! Well-known event key constants and key validation.
//!
//! Event keys are stable strings stored in `event_types.key` and referenced
//! by business logic when emitting events. These constants must match the
//! seed data in `20260810000008_seed_roles_and_event_types.sql`.

use crate::error::CoreError;

pub const EVENT_CONTACT_ADDED: &str = "contact_added";
pub const EVENT_COURSE_PUBLISHED: &str = "course_published";
pub const EVENT_MEETING_SCHEDULED: &str = "meeting_scheduled";
pub const EVENT_CHAT_MESSAGE: &str = "chat_message";
pub const EVENT_DOCUMENT_UPLOADED: &str = "document_uploaded";

/// Seeded disabled; emission of this key is a no-op until it is activated.
pub const EVENT_LEGACY_IMPORT_DONE: &str = "legacy_import_done";

/// Maximum length of an event key.
const MAX_KEY_LEN: usize = 64;

/// Validate an event key.
///
/// Rules:
/// - Must not be empty.
/// - Must not exceed `MAX_KEY_LEN` characters.
/// - Must contain only lowercase alphanumeric or underscore characters.
pub fn validate_event_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation(
            "Event key must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Event key must not exceed {MAX_KEY_LEN} characters"
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(CoreError::Validation(
            "Event key may only contain lowercase alphanumeric or underscore characters"
                .to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn seed_keys_are_valid() {
        for key in [
            EVENT_CONTACT_ADDED,
            EVENT_COURSE_PUBLISHED,
            EVENT_MEETING_SCHEDULED,
            EVENT_CHAT_MESSAGE,
            EVENT_DOCUMENT_UPLOADED,
            EVENT_LEGACY_IMPORT_DONE,
        ] {
            assert!(validate_event_key(key).is_ok(), "{key} should validate");
        }
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_matches!(validate_event_key(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn uppercase_and_punctuation_are_rejected() {
        assert_matches!(
            validate_event_key("ContactAdded"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_event_key("contact-added"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn overlong_key_is_rejected() {
        let key = "k".repeat(65);
        assert_matches!(validate_event_key(&key), Err(CoreError::Validation(_)));
    }
}
