//! Session entity models and DTOs.

use mentorbridge_core::session::SessionStatus;
use mentorbridge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub connection_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session joined with the counterpart's profile summary, as returned by
/// list endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionWithCounterpart {
    pub id: DbId,
    pub connection_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub mentor_id: DbId,
    pub mentee_id: DbId,
    pub counterpart_id: DbId,
    pub counterpart_username: String,
    pub counterpart_picture_url: Option<String>,
}

/// DTO for proposing a new session.
#[derive(Debug, Deserialize)]
pub struct ProposeSession {
    pub connection_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

/// DTO for a session status transition.
///
/// The status string is parsed and case-normalized at the handler
/// boundary. Notes may accompany a COMPLETED transition.
#[derive(Debug, Deserialize)]
pub struct TransitionSession {
    pub status: String,
    pub notes: Option<String>,
}

/// Insert parameters for [`SessionRepo::create_checked`].
///
/// [`SessionRepo::create_checked`]: crate::repositories::SessionRepo::create_checked
#[derive(Debug)]
pub struct NewSession<'a> {
    pub connection_id: DbId,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: SessionStatus,
    pub created_by: DbId,
}
