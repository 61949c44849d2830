//! Domain logic for the MentorBridge mentorship platform.
//!
//! This crate holds the pure pieces shared by the DB and API layers:
//! the connection and session state machines, the scheduling overlap
//! predicate, and the shared error taxonomy. No I/O happens here.

pub mod connection;
pub mod error;
pub mod roles;
pub mod scheduling;
pub mod session;
pub mod types;
