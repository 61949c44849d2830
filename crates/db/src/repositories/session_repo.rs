//! Repository for the `sessions` table.

use mentorbridge_core::session::SessionStatus;
use mentorbridge_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::{NewSession, Session, SessionWithCounterpart};

/// Column list for `sessions` queries.
const COLUMNS: &str = "id, connection_id, title, description, start_time, end_time, status, \
                       notes, created_by, created_at, updated_at";

/// Provides CRUD operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session after checking the time slot, atomically.
    ///
    /// Runs in a single transaction that first takes a `FOR UPDATE` row
    /// lock on the owning connection, serializing concurrent proposals for
    /// the same connection so the check-then-insert cannot race. The
    /// overlap check uses inclusive bounds and ignores CANCELLED and
    /// DECLINED sessions (a freed slot is re-bookable).
    ///
    /// Returns `Ok(None)` when the slot is already booked.
    pub async fn create_checked(
        pool: &PgPool,
        input: &NewSession<'_>,
    ) -> Result<Option<Session>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM connections WHERE id = $1 FOR UPDATE")
            .bind(input.connection_id)
            .fetch_one(&mut *tx)
            .await?;

        let conflict: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM sessions
                 WHERE connection_id = $1
                   AND status NOT IN ('CANCELLED', 'DECLINED')
                   AND start_time <= $3
                   AND end_time >= $2
             )",
        )
        .bind(input.connection_id)
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_one(&mut *tx)
        .await?;

        if conflict {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO sessions
                 (connection_id, title, description, start_time, end_time, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(input.connection_id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.status.as_str())
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Find a session by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically transition a session from an expected status.
    ///
    /// The `status = $2` guard makes concurrent transitions lose cleanly:
    /// the loser matches no row and gets `None`. Notes, when supplied,
    /// replace the stored notes (used on COMPLETED).
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: SessionStatus,
        to: SessionStatus,
        notes: Option<&str>,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions
             SET status = $3, notes = COALESCE($4, notes), updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// List a user's sessions joined with the counterpart's summary,
    /// earliest start first.
    ///
    /// `role` restricts to the side the user plays on the owning
    /// connection; `connection_id` and the date bounds filter further.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        role: Option<&str>,
        connection_id: Option<DbId>,
        start_date: Option<Timestamp>,
        end_date: Option<Timestamp>,
    ) -> Result<Vec<SessionWithCounterpart>, sqlx::Error> {
        let role_clause = match role {
            Some("mentor") => "c.mentor_id = $1",
            Some("mentee") => "c.mentee_id = $1",
            _ => "(c.mentor_id = $1 OR c.mentee_id = $1)",
        };

        let mut clauses = vec![role_clause.to_string()];
        let mut next_param = 2;
        if connection_id.is_some() {
            clauses.push(format!("s.connection_id = ${next_param}"));
            next_param += 1;
        }
        if start_date.is_some() {
            clauses.push(format!("s.start_time >= ${next_param}"));
            next_param += 1;
        }
        if end_date.is_some() {
            clauses.push(format!("s.start_time <= ${next_param}"));
        }

        let where_clause = clauses.join(" AND ");
        let query = format!(
            "SELECT s.id, s.connection_id, s.title, s.description, s.start_time, s.end_time,
                    s.status, s.notes, s.created_by, s.created_at, s.updated_at,
                    c.mentor_id, c.mentee_id,
                    u.id AS counterpart_id, u.username AS counterpart_username,
                    p.picture_url AS counterpart_picture_url
             FROM sessions s
             JOIN connections c ON c.id = s.connection_id
             JOIN users u
               ON u.id = CASE WHEN c.mentor_id = $1 THEN c.mentee_id ELSE c.mentor_id END
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE {where_clause}
             ORDER BY s.start_time"
        );

        let mut q = sqlx::query_as::<_, SessionWithCounterpart>(&query).bind(user_id);
        if let Some(cid) = connection_id {
            q = q.bind(cid);
        }
        if let Some(start) = start_date {
            q = q.bind(start);
        }
        if let Some(end) = end_date {
            q = q.bind(end);
        }
        q.fetch_all(pool).await
    }
}
