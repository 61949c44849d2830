//! Notification entity model.

use mentorbridge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    /// Tag used by the client for icon and link resolution, e.g.
    /// `"connection_request"` or `"session_update"`.
    pub kind: String,
    /// Loose reference to the triggering connection or session.
    pub entity_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
