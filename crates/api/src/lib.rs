//! MentorBridge HTTP API.
//!
//! Exposes the connection lifecycle and session scheduling workflow over
//! REST, plus the surrounding directory, messaging, and notification
//! endpoints. Library form so integration tests can build the exact
//! production router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod router;
pub mod routes;
pub mod state;
