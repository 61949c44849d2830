//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod connection;
pub mod health;
pub mod message;
pub mod notification;
pub mod session;
pub mod users;
