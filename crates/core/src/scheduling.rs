//! Session scheduling: interval validation and the overlap predicate.
//!
//! Bound policy: overlap uses inclusive bounds (`a.start <= b.end AND
//! a.end >= b.start`), so two sessions that touch at a boundary (one ends
//! at 11:00, the next starts at 11:00) conflict. The repository's conflict
//! check and these helpers must agree; both are covered by tests for the
//! boundary-touching and boundary-overlapping cases.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Validate that a proposed interval is well-formed (`start < end`).
///
/// Runs before any conflict check so a degenerate interval never reaches
/// the database.
pub fn validate_interval(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start < end {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "startTime must be before endTime".to_string(),
        ))
    }
}

/// Inclusive-bounds interval overlap.
pub fn overlaps(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn t(hour: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn valid_interval_passes() {
        assert!(validate_interval(t(10, 0), t(11, 0)).is_ok());
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let err = validate_interval(t(10, 0), t(10, 0)).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        assert!(validate_interval(t(11, 0), t(10, 0)).is_err());
    }

    #[test]
    fn partial_overlap_conflicts() {
        // [10:00, 11:00] vs [10:30, 11:30]
        assert!(overlaps(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
    }

    #[test]
    fn containment_conflicts() {
        // [10:00, 12:00] contains [10:30, 11:00]
        assert!(overlaps(t(10, 0), t(12, 0), t(10, 30), t(11, 0)));
        assert!(overlaps(t(10, 30), t(11, 0), t(10, 0), t(12, 0)));
    }

    #[test]
    fn touching_boundary_conflicts_under_inclusive_bounds() {
        // [10:00, 11:00] vs [11:00, 12:00] share exactly one instant.
        assert!(overlaps(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(overlaps(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!overlaps(t(10, 0), t(11, 0), t(11, 1), t(12, 0)));
        assert!(!overlaps(t(11, 1), t(12, 0), t(10, 0), t(11, 0)));
    }
}
