//! Cached event type lookup.

use std::time::Duration;

use mentora_core::cache::TtlCache;
use mentora_db::models::EventType;
use mentora_db::repositories::EventTypeRepo;
use mentora_db::DbPool;

/// Resolves event keys to active [`EventType`] definitions.
///
/// Lookups are cached with the TTL injected at construction; configuration
/// changes land within one TTL, or immediately via
/// [`invalidate`](EventTypeRegistry::invalidate) when the mutator is
/// in-process. Only active event types are cached, so disabling a type is
/// visible as soon as the cached entry expires.
pub struct EventTypeRegistry {
    cache: TtlCache<String, EventType>,
}

impl EventTypeRegistry {
    /// Create a registry whose cached entries live for `cache_ttl`.
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Resolve an event key to its active event type.
    ///
    /// Returns `Ok(None)` when the key is unknown or the type is inactive;
    /// emission treats that as a silent no-op, never a hard failure.
    pub async fn resolve(
        &self,
        pool: &DbPool,
        event_key: &str,
    ) -> Result<Option<EventType>, sqlx::Error> {
        if let Some(event_type) = self.cache.get(&event_key.to_string()) {
            return Ok(Some(event_type));
        }

        match EventTypeRepo::find_active_by_key(pool, event_key).await? {
            Some(event_type) => {
                self.cache.insert(event_key.to_string(), event_type.clone());
                Ok(Some(event_type))
            }
            // Misses are not negatively cached: an event type activated
            // after a failed resolve is picked up on the next emission.
            None => Ok(None),
        }
    }

    /// Drop the cached entry for one event key.
    pub fn invalidate(&self, event_key: &str) {
        self.cache.invalidate(&event_key.to_string());
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
