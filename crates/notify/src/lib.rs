//! Mentora notification event routing and rate-limiting engine.
//!
//! Accepts domain events emitted anywhere in the host application, decides
//! which users should be told about them, and enforces delivery discipline
//! under concurrent emission:
//!
//! - [`EventTypeRegistry`] — cached lookup of event definitions.
//! - Routing rules and recipient expansion — table-driven resolution of
//!   (event type, sender role) into concrete user IDs.
//! - [`RateLimiter`] — cooldown, hourly-cap, and daily-cap gates evaluated
//!   against the append-only delivery log.
//! - [`NotificationWriter`] — the single component that writes the
//!   notification and delivery-log rows, atomically with the gate check.
//! - [`NotificationEngine`] — the `emit_event` fan-out entry point.
//!
//! The engine is an in-process library: no HTTP surface, no scheduler
//! thread. The host application constructs one [`NotificationEngine`],
//! shares it via `Arc`, and calls
//! [`emit_event`](NotificationEngine::emit_event) inline from business
//! logic. The call is designed to be safe there — it returns quickly,
//! swallows per-recipient failures, and never panics on missing
//! configuration.

pub mod config;
pub mod engine;
pub mod limiter;
pub mod payload;
pub mod recipients;
pub mod registry;
pub mod writer;

pub use config::EngineConfig;
pub use engine::NotificationEngine;
pub use limiter::{GateDecision, RateLimiter, SuppressReason};
pub use payload::EventPayload;
pub use recipients::RecipientResolver;
pub use registry::EventTypeRegistry;
pub use writer::{DeliveryOutcome, NotificationContent, NotificationWriter};
