//! Best-effort notification sink.
//!
//! Domain events from the connection and session workflows are mapped to
//! static title/message templates and fanned out as `notifications` rows.
//! Emission happens after the primary state change has committed and MUST
//! NOT fail the primary operation: persistence errors are logged and
//! swallowed here.

use mentorbridge_core::types::DbId;
use mentorbridge_db::repositories::NotificationRepo;
use mentorbridge_db::DbPool;

/// Notification kind tags consumed by the client for icon/link resolution.
pub const KIND_CONNECTION_REQUEST: &str = "connection_request";
pub const KIND_CONNECTION_UPDATE: &str = "connection_update";
pub const KIND_SESSION_REQUEST: &str = "session_request";
pub const KIND_SESSION_UPDATE: &str = "session_update";

/// A domain event worth telling someone about.
///
/// Each variant carries the recipients and the display names needed by its
/// message templates; [`Event::fan_out`] turns it into concrete
/// notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A mentee requested a connection with a mentor.
    ConnectionRequested {
        connection_id: DbId,
        mentor_id: DbId,
        mentee_id: DbId,
        mentee_name: String,
        mentor_name: String,
    },
    /// The mentor accepted a pending request.
    ConnectionAccepted {
        connection_id: DbId,
        mentor_id: DbId,
        mentee_id: DbId,
        mentor_name: String,
        mentee_name: String,
    },
    /// The mentor rejected a pending request.
    ConnectionRejected {
        connection_id: DbId,
        mentee_id: DbId,
        mentor_name: String,
    },
    /// A mentee proposed a session (awaiting mentor approval).
    SessionProposed {
        session_id: DbId,
        recipient_id: DbId,
        proposer_name: String,
        title: String,
    },
    /// A session was scheduled: either created directly by the mentor or
    /// approved out of PENDING.
    SessionScheduled {
        session_id: DbId,
        recipient_id: DbId,
        title: String,
    },
    /// The mentor declined a proposed session.
    SessionDeclined {
        session_id: DbId,
        recipient_id: DbId,
        title: String,
    },
    /// A scheduled session was marked completed.
    SessionCompleted {
        session_id: DbId,
        recipient_id: DbId,
        title: String,
    },
    /// A scheduled session was cancelled.
    SessionCancelled {
        session_id: DbId,
        recipient_id: DbId,
        title: String,
    },
}

/// A single notification ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub recipient_id: DbId,
    pub title: String,
    pub message: String,
    pub kind: &'static str,
    pub entity_id: Option<DbId>,
}

impl Event {
    /// Expand the event into one notification per recipient.
    pub fn fan_out(&self) -> Vec<Outbound> {
        match self {
            Event::ConnectionRequested {
                connection_id,
                mentor_id,
                mentee_id,
                mentee_name,
                mentor_name,
            } => vec![
                Outbound {
                    recipient_id: *mentor_id,
                    title: "New Connection Request".to_string(),
                    message: format!("{mentee_name} has requested to connect with you"),
                    kind: KIND_CONNECTION_REQUEST,
                    entity_id: Some(*connection_id),
                },
                Outbound {
                    recipient_id: *mentee_id,
                    title: "Connection Request Sent".to_string(),
                    message: format!("Your connection request to {mentor_name} has been sent"),
                    kind: KIND_CONNECTION_UPDATE,
                    entity_id: Some(*connection_id),
                },
            ],
            Event::ConnectionAccepted {
                connection_id,
                mentor_id,
                mentee_id,
                mentor_name,
                mentee_name,
            } => vec![
                Outbound {
                    recipient_id: *mentee_id,
                    title: "Request Accepted".to_string(),
                    message: format!("{mentor_name} has accepted your connection request"),
                    kind: KIND_CONNECTION_UPDATE,
                    entity_id: Some(*connection_id),
                },
                Outbound {
                    recipient_id: *mentor_id,
                    title: "Connection Made".to_string(),
                    message: format!("You are now connected with {mentee_name}"),
                    kind: KIND_CONNECTION_UPDATE,
                    entity_id: Some(*connection_id),
                },
            ],
            Event::ConnectionRejected {
                connection_id,
                mentee_id,
                mentor_name,
            } => vec![Outbound {
                recipient_id: *mentee_id,
                title: "Request Rejected".to_string(),
                message: format!("{mentor_name} has declined your connection request"),
                kind: KIND_CONNECTION_UPDATE,
                entity_id: Some(*connection_id),
            }],
            Event::SessionProposed {
                session_id,
                recipient_id,
                proposer_name,
                title,
            } => vec![Outbound {
                recipient_id: *recipient_id,
                title: "New Session Request".to_string(),
                message: format!("{proposer_name} has proposed a session: {title}"),
                kind: KIND_SESSION_REQUEST,
                entity_id: Some(*session_id),
            }],
            Event::SessionScheduled {
                session_id,
                recipient_id,
                title,
            } => vec![Outbound {
                recipient_id: *recipient_id,
                title: "New Session Scheduled".to_string(),
                message: format!("Session scheduled: {title}"),
                kind: KIND_SESSION_UPDATE,
                entity_id: Some(*session_id),
            }],
            Event::SessionDeclined {
                session_id,
                recipient_id,
                title,
            } => vec![Outbound {
                recipient_id: *recipient_id,
                title: "Session Declined".to_string(),
                message: format!("Session declined: {title}"),
                kind: KIND_SESSION_UPDATE,
                entity_id: Some(*session_id),
            }],
            Event::SessionCompleted {
                session_id,
                recipient_id,
                title,
            } => vec![Outbound {
                recipient_id: *recipient_id,
                title: "Session Completed".to_string(),
                message: format!("Session completed: {title}"),
                kind: KIND_SESSION_UPDATE,
                entity_id: Some(*session_id),
            }],
            Event::SessionCancelled {
                session_id,
                recipient_id,
                title,
            } => vec![Outbound {
                recipient_id: *recipient_id,
                title: "Session Cancelled".to_string(),
                message: format!("Session cancelled: {title}"),
                kind: KIND_SESSION_UPDATE,
                entity_id: Some(*session_id),
            }],
        }
    }
}

/// Persists notifications, swallowing its own failures.
pub struct Notifier {
    pool: DbPool,
}

impl Notifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Emit an event: write one notification row per recipient.
    ///
    /// Failures are logged and never propagated -- the caller's state
    /// change has already committed and must not be rolled back over a
    /// notification.
    pub async fn emit(&self, event: Event) {
        for out in event.fan_out() {
            let result = NotificationRepo::create(
                &self.pool,
                out.recipient_id,
                &out.title,
                &out.message,
                out.kind,
                out.entity_id,
            )
            .await;
            if let Err(err) = result {
                tracing::warn!(
                    recipient_id = out.recipient_id,
                    kind = out.kind,
                    error = %err,
                    "Failed to persist notification"
                );
            }
        }
    }
}
