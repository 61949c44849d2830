//! Repository for the `connections` table.

use mentorbridge_core::connection::ConnectionStatus;
use mentorbridge_core::types::DbId;
use sqlx::PgPool;

use crate::models::connection::{Connection, ConnectionWithCounterpart};

/// Column list for `connections` queries.
const COLUMNS: &str = "id, mentor_id, mentee_id, status, request_message, created_at, updated_at";

/// Provides CRUD operations for connections.
pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Insert a new PENDING connection, returning the created row.
    ///
    /// The unique (mentor, mentee) constraint backstops duplicate-request
    /// races; a violation surfaces as a 23505 database error.
    pub async fn create(
        pool: &PgPool,
        mentor_id: DbId,
        mentee_id: DbId,
        message: Option<&str>,
    ) -> Result<Connection, sqlx::Error> {
        let query = format!(
            "INSERT INTO connections (mentor_id, mentee_id, request_message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(mentor_id)
            .bind(mentee_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Find a connection by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Connection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM connections WHERE id = $1");
        sqlx::query_as::<_, Connection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the connection for a (mentor, mentee) pair, whatever its status.
    pub async fn find_pair(
        pool: &PgPool,
        mentor_id: DbId,
        mentee_id: DbId,
    ) -> Result<Option<Connection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM connections WHERE mentor_id = $1 AND mentee_id = $2");
        sqlx::query_as::<_, Connection>(&query)
            .bind(mentor_id)
            .bind(mentee_id)
            .fetch_optional(pool)
            .await
    }

    /// Reopen a REJECTED connection back to PENDING with a fresh request
    /// message (re-request is update-in-place, not a second row).
    ///
    /// Returns `None` if the row is not currently REJECTED.
    pub async fn reopen(
        pool: &PgPool,
        id: DbId,
        message: Option<&str>,
    ) -> Result<Option<Connection>, sqlx::Error> {
        let query = format!(
            "UPDATE connections
             SET status = 'PENDING', request_message = $2, updated_at = NOW()
             WHERE id = $1 AND status = 'REJECTED'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(id)
            .bind(message)
            .fetch_optional(pool)
            .await
    }

    /// Atomically decide a PENDING connection.
    ///
    /// The `status = 'PENDING'` guard makes double-accept races lose
    /// cleanly: the second decision matches no row and returns `None`.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        decision: ConnectionStatus,
    ) -> Result<Option<Connection>, sqlx::Error> {
        let query = format!(
            "UPDATE connections
             SET status = $2, updated_at = NOW()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(id)
            .bind(decision.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List a user's connections joined with the counterpart's profile
    /// summary, most recently created first.
    ///
    /// `role` restricts to the side the user plays: `Some("mentor")`,
    /// `Some("mentee")`, or `None` for either.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        role: Option<&str>,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<ConnectionWithCounterpart>, sqlx::Error> {
        let role_clause = match role {
            Some("mentor") => "c.mentor_id = $1",
            Some("mentee") => "c.mentee_id = $1",
            _ => "(c.mentor_id = $1 OR c.mentee_id = $1)",
        };
        let status_clause = if status.is_some() {
            "AND c.status = $2"
        } else {
            ""
        };
        let query = format!(
            "SELECT c.id, c.mentor_id, c.mentee_id, c.status, c.request_message,
                    c.created_at, c.updated_at,
                    u.id AS counterpart_id, u.username AS counterpart_username,
                    p.bio AS counterpart_bio, p.skills AS counterpart_skills,
                    p.picture_url AS counterpart_picture_url,
                    p.location AS counterpart_location
             FROM connections c
             JOIN users u
               ON u.id = CASE WHEN c.mentor_id = $1 THEN c.mentee_id ELSE c.mentor_id END
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE {role_clause} {status_clause}
             ORDER BY c.created_at DESC"
        );
        let mut q = sqlx::query_as::<_, ConnectionWithCounterpart>(&query).bind(user_id);
        if let Some(s) = status {
            q = q.bind(s.as_str());
        }
        q.fetch_all(pool).await
    }
}
