//! Well-known role name constants.
//!
//! These must match the seed data in
//! `20260810000008_seed_roles_and_event_types.sql`. Routing is
//! table-driven, so code never branches on these; they exist for seed
//! data, tests, and host-application configuration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_TRAINER: &str = "trainer";
pub const ROLE_PARTNER: &str = "partner";
