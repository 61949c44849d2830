//! Repository for the `messages` table.

use mentorbridge_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

/// Column list for `messages` queries.
const COLUMNS: &str = "id, connection_id, sender_id, recipient_id, content, is_read, created_at";

/// Provides CRUD operations for messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        connection_id: DbId,
        sender_id: DbId,
        recipient_id: DbId,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (connection_id, sender_id, recipient_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(connection_id)
            .bind(sender_id)
            .bind(recipient_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List all messages in a connection, oldest first (thread order).
    pub async fn list_for_connection(
        pool: &PgPool,
        connection_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE connection_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(connection_id)
            .fetch_all(pool)
            .await
    }

    /// Mark all messages addressed to `recipient_id` in a connection as
    /// read. Returns the number of rows updated.
    pub async fn mark_read(
        pool: &PgPool,
        connection_id: DbId,
        recipient_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true
             WHERE connection_id = $1 AND recipient_id = $2 AND is_read = false",
        )
        .bind(connection_id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
