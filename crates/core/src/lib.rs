//! Mentora domain layer.
//!
//! Database-free building blocks shared by the persistence and notification
//! crates: shared type aliases, well-known role and event-key constants,
//! the domain error enum, and the TTL cache used for read-only
//! configuration lookups.

pub mod cache;
pub mod error;
pub mod event_keys;
pub mod roles;
pub mod types;

pub use cache::TtlCache;
pub use error::CoreError;
