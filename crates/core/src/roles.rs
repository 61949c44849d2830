//! Well-known role name constants.
//!
//! These must match the values accepted by the `users.role` CHECK
//! constraint in `20260101000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MENTOR: &str = "mentor";
pub const ROLE_MENTEE: &str = "mentee";
