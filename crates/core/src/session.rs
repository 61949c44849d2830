//! Session lifecycle: status enum, transition table, and list bucketing.
//!
//! A session is a time-boxed meeting scoped to one connection. Its state
//! machine:
//!
//! ```text
//! PENDING   --approve--> SCHEDULED
//! PENDING   --decline--> DECLINED    (terminal)
//! SCHEDULED --complete--> COMPLETED  (terminal)
//! SCHEDULED --cancel-->  CANCELLED   (terminal)
//! ```
//!
//! Approval transitions (out of PENDING) are mentor-only; completion and
//! cancellation may be performed by either party.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Status of a mentorship session.
///
/// Persisted as uppercase TEXT; parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
    Declined,
}

impl SessionStatus {
    /// Canonical (stored) form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Pending => "PENDING",
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::Cancelled => "CANCELLED",
            SessionStatus::Declined => "DECLINED",
        }
    }

    /// PENDING and SCHEDULED are the only non-terminal states.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Declined
        )
    }

    /// A CANCELLED or DECLINED session no longer occupies its time slot.
    pub fn occupies_slot(self) -> bool {
        !matches!(self, SessionStatus::Cancelled | SessionStatus::Declined)
    }

    /// Initial status for a newly proposed session.
    ///
    /// A mentor-created session is born SCHEDULED (no self-approval hop);
    /// a mentee proposal waits for mentor approval in PENDING.
    pub fn initial_for(proposed_by_mentor: bool) -> Self {
        if proposed_by_mentor {
            SessionStatus::Scheduled
        } else {
            SessionStatus::Pending
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SessionStatus::Pending),
            "SCHEDULED" => Ok(SessionStatus::Scheduled),
            "COMPLETED" => Ok(SessionStatus::Completed),
            "CANCELLED" => Ok(SessionStatus::Cancelled),
            "DECLINED" => Ok(SessionStatus::Declined),
            other => Err(CoreError::Validation(format!(
                "Invalid session status '{other}'. Must be one of: \
                 PENDING, SCHEDULED, COMPLETED, CANCELLED, DECLINED"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of valid target statuses reachable from `from`.
///
/// Terminal states return an empty slice because no further transitions
/// are allowed.
pub fn valid_transitions(from: SessionStatus) -> &'static [SessionStatus] {
    match from {
        SessionStatus::Pending => &[SessionStatus::Scheduled, SessionStatus::Declined],
        SessionStatus::Scheduled => &[SessionStatus::Completed, SessionStatus::Cancelled],
        SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Declined => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: SessionStatus, to: SessionStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning a [`CoreError::InvalidTransition`]
/// for invalid ones.
pub fn validate_transition(from: SessionStatus, to: SessionStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition(format!("{from} -> {to}")))
    }
}

/// Whether a transition out of `from` may only be performed by the mentor.
///
/// Approval-style transitions (deciding a PENDING proposal) are mentor-only;
/// completing or cancelling a SCHEDULED session is open to either party.
pub fn is_mentor_only(from: SessionStatus) -> bool {
    from == SessionStatus::Pending
}

// ---------------------------------------------------------------------------
// List bucketing
// ---------------------------------------------------------------------------

/// Client-visible bucket a session is listed under.
///
/// Pure function of `(status, start_time, now)` -- recomputed on every list
/// call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBucket {
    /// SCHEDULED with a start time still in the future.
    Upcoming,
    /// Awaiting mentor approval.
    Pending,
    /// COMPLETED, or SCHEDULED whose start time has elapsed.
    Past,
    /// CANCELLED or DECLINED.
    Cancelled,
}

impl SessionBucket {
    /// Bucket key used in list responses.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionBucket::Upcoming => "upcoming",
            SessionBucket::Pending => "pending",
            SessionBucket::Past => "past",
            SessionBucket::Cancelled => "cancelled",
        }
    }
}

/// Compute the bucket for a session.
pub fn bucket_for(status: SessionStatus, start_time: Timestamp, now: Timestamp) -> SessionBucket {
    match status {
        SessionStatus::Pending => SessionBucket::Pending,
        SessionStatus::Scheduled if start_time > now => SessionBucket::Upcoming,
        SessionStatus::Scheduled | SessionStatus::Completed => SessionBucket::Past,
        SessionStatus::Cancelled | SessionStatus::Declined => SessionBucket::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_scheduled() {
        assert!(can_transition(SessionStatus::Pending, SessionStatus::Scheduled));
    }

    #[test]
    fn pending_to_declined() {
        assert!(can_transition(SessionStatus::Pending, SessionStatus::Declined));
    }

    #[test]
    fn scheduled_to_completed() {
        assert!(can_transition(SessionStatus::Scheduled, SessionStatus::Completed));
    }

    #[test]
    fn scheduled_to_cancelled() {
        assert!(can_transition(SessionStatus::Scheduled, SessionStatus::Cancelled));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_cannot_skip_to_completed() {
        let err = validate_transition(SessionStatus::Pending, SessionStatus::Completed)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition(_));
    }

    #[test]
    fn pending_cannot_be_cancelled() {
        assert!(!can_transition(SessionStatus::Pending, SessionStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(valid_transitions(SessionStatus::Completed).is_empty());
        assert!(valid_transitions(SessionStatus::Cancelled).is_empty());
        assert!(valid_transitions(SessionStatus::Declined).is_empty());
    }

    #[test]
    fn no_transition_back_to_pending() {
        assert!(!can_transition(SessionStatus::Scheduled, SessionStatus::Pending));
        assert!(!can_transition(SessionStatus::Declined, SessionStatus::Pending));
    }

    // -----------------------------------------------------------------------
    // Role gating and initial status
    // -----------------------------------------------------------------------

    #[test]
    fn approval_transitions_are_mentor_only() {
        assert!(is_mentor_only(SessionStatus::Pending));
        assert!(!is_mentor_only(SessionStatus::Scheduled));
    }

    #[test]
    fn mentor_proposal_is_born_scheduled() {
        assert_eq!(SessionStatus::initial_for(true), SessionStatus::Scheduled);
        assert_eq!(SessionStatus::initial_for(false), SessionStatus::Pending);
    }

    // -----------------------------------------------------------------------
    // Slot occupancy
    // -----------------------------------------------------------------------

    #[test]
    fn dead_sessions_free_their_slot() {
        assert!(SessionStatus::Pending.occupies_slot());
        assert!(SessionStatus::Scheduled.occupies_slot());
        assert!(SessionStatus::Completed.occupies_slot());
        assert!(!SessionStatus::Cancelled.occupies_slot());
        assert!(!SessionStatus::Declined.occupies_slot());
    }

    // -----------------------------------------------------------------------
    // Bucketing
    // -----------------------------------------------------------------------

    #[test]
    fn scheduled_future_session_is_upcoming() {
        let now = Utc::now();
        let start = now + Duration::hours(2);
        assert_eq!(
            bucket_for(SessionStatus::Scheduled, start, now),
            SessionBucket::Upcoming
        );
    }

    #[test]
    fn scheduled_elapsed_session_is_past_not_upcoming() {
        let now = Utc::now();
        let start = now - Duration::days(30);
        assert_eq!(
            bucket_for(SessionStatus::Scheduled, start, now),
            SessionBucket::Past
        );
    }

    #[test]
    fn completed_session_is_past_regardless_of_start() {
        let now = Utc::now();
        let future = now + Duration::hours(1);
        assert_eq!(
            bucket_for(SessionStatus::Completed, future, now),
            SessionBucket::Past
        );
    }

    #[test]
    fn pending_session_is_pending_even_when_elapsed() {
        let now = Utc::now();
        let start = now - Duration::hours(1);
        assert_eq!(
            bucket_for(SessionStatus::Pending, start, now),
            SessionBucket::Pending
        );
    }

    #[test]
    fn cancelled_and_declined_bucket_together() {
        let now = Utc::now();
        let start = now + Duration::hours(1);
        assert_eq!(
            bucket_for(SessionStatus::Cancelled, start, now),
            SessionBucket::Cancelled
        );
        assert_eq!(
            bucket_for(SessionStatus::Declined, start, now),
            SessionBucket::Cancelled
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "scheduled".parse::<SessionStatus>().unwrap(),
            SessionStatus::Scheduled
        );
        assert_eq!(
            "Declined".parse::<SessionStatus>().unwrap(),
            SessionStatus::Declined
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert!("POSTPONED".parse::<SessionStatus>().is_err());
    }
}
