//! Entity models.
//!
//! One module per table group; all row structs derive `FromRow` and use the
//! `DbId` / `Timestamp` aliases from `mentora-core`.

pub mod delivery_log;
pub mod event_type;
pub mod notification;
pub mod rate_limit_policy;
pub mod role;
pub mod routing_rule;
pub mod user;

pub use delivery_log::DeliveryLogEntry;
pub use event_type::EventType;
pub use notification::{Notification, NotificationPreference};
pub use rate_limit_policy::RateLimitPolicy;
pub use role::Role;
pub use routing_rule::RoutingRule;
pub use user::{CreateUser, User};
