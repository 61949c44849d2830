//! Entity models and DTOs, one module per table.

pub mod connection;
pub mod message;
pub mod notification;
pub mod profile;
pub mod session;
pub mod user;
