//! Message entity model and DTOs.

use mentorbridge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub connection_id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for sending a message within a connection.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub connection_id: DbId,
    pub content: String,
}
