//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, for writes that must join an enclosing
//! transaction, any `PgExecutor`) as the first argument.

pub mod delivery_log_repo;
pub mod event_type_repo;
pub mod notification_preference_repo;
pub mod notification_repo;
pub mod rate_limit_policy_repo;
pub mod role_repo;
pub mod routing_rule_repo;
pub mod user_repo;

pub use delivery_log_repo::DeliveryLogRepo;
pub use event_type_repo::EventTypeRepo;
pub use notification_preference_repo::NotificationPreferenceRepo;
pub use notification_repo::NotificationRepo;
pub use rate_limit_policy_repo::RateLimitPolicyRepo;
pub use role_repo::RoleRepo;
pub use routing_rule_repo::RoutingRuleRepo;
pub use user_repo::UserRepo;
