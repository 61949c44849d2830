//! Connection lifecycle: status enum and decision rules.
//!
//! A connection is the mentor<->mentee relationship record. It is created
//! PENDING by a mentee request and decided exactly once by the mentor:
//!
//! ```text
//! PENDING --accept--> ACCEPTED   (terminal)
//! PENDING --reject--> REJECTED   (terminal, re-requestable)
//! ```
//!
//! A REJECTED pair may submit a brand-new request, which reopens the
//! existing row back to PENDING (update-in-place, so the unique
//! (mentor, mentee) constraint is preserved).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a mentor<->mentee connection.
///
/// Persisted as uppercase TEXT. Parsing is case-insensitive so mixed-case
/// values at the API boundary normalize to the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    /// Canonical (stored) form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "PENDING",
            ConnectionStatus::Accepted => "ACCEPTED",
            ConnectionStatus::Rejected => "REJECTED",
        }
    }

    /// ACCEPTED and REJECTED are terminal: no transition leads out of them
    /// (a rejected pair re-requests via row reopen, not a transition).
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionStatus::Accepted | ConnectionStatus::Rejected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ConnectionStatus::Pending),
            "ACCEPTED" => Ok(ConnectionStatus::Accepted),
            "REJECTED" => Ok(ConnectionStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid connection status '{other}'. Must be one of: PENDING, ACCEPTED, REJECTED"
            ))),
        }
    }
}

/// Validate a mentor's decision on a pending connection.
///
/// Only ACCEPTED and REJECTED are valid decisions, and only a PENDING
/// connection may be decided.
pub fn validate_decision(
    current: ConnectionStatus,
    decision: ConnectionStatus,
) -> Result<(), CoreError> {
    if decision == ConnectionStatus::Pending {
        return Err(CoreError::Validation(
            "Decision must be ACCEPTED or REJECTED".to_string(),
        ));
    }
    if current != ConnectionStatus::Pending {
        return Err(CoreError::InvalidTransition(format!(
            "Connection is already {current}; only PENDING connections can be decided"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "accepted".parse::<ConnectionStatus>().unwrap(),
            ConnectionStatus::Accepted
        );
        assert_eq!(
            "Pending".parse::<ConnectionStatus>().unwrap(),
            ConnectionStatus::Pending
        );
        assert_eq!(
            "REJECTED".parse::<ConnectionStatus>().unwrap(),
            ConnectionStatus::Rejected
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        let err = "BLOCKED".parse::<ConnectionStatus>().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn pending_is_not_terminal() {
        assert!(!ConnectionStatus::Pending.is_terminal());
        assert!(ConnectionStatus::Accepted.is_terminal());
        assert!(ConnectionStatus::Rejected.is_terminal());
    }

    #[test]
    fn decide_pending_connection() {
        assert!(validate_decision(ConnectionStatus::Pending, ConnectionStatus::Accepted).is_ok());
        assert!(validate_decision(ConnectionStatus::Pending, ConnectionStatus::Rejected).is_ok());
    }

    #[test]
    fn cannot_decide_twice() {
        let err = validate_decision(ConnectionStatus::Accepted, ConnectionStatus::Rejected)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition(_));

        let err = validate_decision(ConnectionStatus::Rejected, ConnectionStatus::Accepted)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition(_));
    }

    #[test]
    fn pending_is_not_a_decision() {
        let err = validate_decision(ConnectionStatus::Pending, ConnectionStatus::Pending)
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn serde_uses_uppercase() {
        let json = serde_json::to_string(&ConnectionStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        let parsed: ConnectionStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(parsed, ConnectionStatus::Rejected);
    }
}
