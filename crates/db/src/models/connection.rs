//! Connection entity models and DTOs.

use mentorbridge_core::connection::ConnectionStatus;
use mentorbridge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `connections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Connection {
    pub id: DbId,
    pub mentor_id: DbId,
    pub mentee_id: DbId,
    pub status: ConnectionStatus,
    pub request_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Connection {
    /// Whether `user_id` is one of the two parties to this connection.
    pub fn is_member(&self, user_id: DbId) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }

    /// The other party relative to `user_id`. Callers must check
    /// [`is_member`](Self::is_member) first.
    pub fn counterpart_of(&self, user_id: DbId) -> DbId {
        if self.mentor_id == user_id {
            self.mentee_id
        } else {
            self.mentor_id
        }
    }
}

/// Connection joined with the counterpart's profile summary, as returned
/// by list endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConnectionWithCounterpart {
    pub id: DbId,
    pub mentor_id: DbId,
    pub mentee_id: DbId,
    pub status: ConnectionStatus,
    pub request_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub counterpart_id: DbId,
    pub counterpart_username: String,
    pub counterpart_bio: Option<String>,
    pub counterpart_skills: Option<String>,
    pub counterpart_picture_url: Option<String>,
    pub counterpart_location: Option<String>,
}

/// DTO for a mentee-initiated connection request.
#[derive(Debug, Deserialize)]
pub struct RequestConnection {
    pub mentor_id: DbId,
    pub message: Option<String>,
}

/// DTO for the mentor's decision on a pending request.
///
/// The status string is parsed and case-normalized at the handler
/// boundary; only ACCEPTED and REJECTED are valid decisions.
#[derive(Debug, Deserialize)]
pub struct DecideConnection {
    pub status: String,
}
