//! Pure validation rules for scheduling requests.
//!
//! Each function computes constraint violations for one aspect of a
//! proposed request and returns them as an [`ErrorSet`]; an empty set
//! means the aspect is clean. Functions that need read-only lookups take
//! the repository capability they read from and surface storage faults
//! separately from violations.
//!
//! Ordering contract (enforced by the commands): reference-existence
//! failures short-circuit the domain-specific checks, so a missing user
//! never also reports coordinate errors. Everything else accumulates.

use chrono::{DateTime, Utc};

use super::{ErrorSet, ErrorTag};
use crate::api::{AppointmentId, TelescopeId, UserId};
use crate::db::repository::{
    AllottedTimeCapRepository, AppointmentRepository, RepositoryResult, TelescopeRepository,
    UserRepository,
};

/// Temporal validity of a proposed window.
///
/// Requires `start < end` and a start that is not strictly in the past.
/// `now` is the evaluation instant, captured once per validation pass;
/// comparisons are at whole-second resolution and `start == now` is
/// accepted.
pub fn validate_time_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ErrorSet {
    let mut errors = ErrorSet::new();

    if end <= start {
        errors.put(ErrorTag::EndTime, "End time must be after the start time");
    }
    if start.timestamp() < now.timestamp() {
        errors.put(ErrorTag::StartTime, "Start time must not be in the past");
    }

    errors
}

/// Coordinate component bounds.
///
/// Each out-of-range component produces its own tagged violation; a
/// request with several bad components reports all of them.
pub fn validate_coordinate(hours: i32, minutes: i32, seconds: i32, declination: f64) -> ErrorSet {
    let mut errors = ErrorSet::new();

    if !(0..24).contains(&hours) {
        errors.put(ErrorTag::Hours, "Hours must be between 0 and 24");
    }
    if !(0..60).contains(&minutes) {
        errors.put(ErrorTag::Minutes, "Minutes must be between 0 and 60");
    }
    if !(0..60).contains(&seconds) {
        errors.put(ErrorTag::Seconds, "Seconds must be between 0 and 60");
    }
    if !(-90.0..=90.0).contains(&declination) {
        errors.put(ErrorTag::Declination, "Declination must be between -90 and 90");
    }

    errors
}

/// Existence of the referenced user and telescope.
///
/// Callers must short-circuit on a non-empty result before running the
/// domain-specific checks.
pub async fn validate_references(
    user_repo: &dyn UserRepository,
    telescope_repo: &dyn TelescopeRepository,
    user_id: UserId,
    telescope_id: TelescopeId,
) -> RepositoryResult<ErrorSet> {
    let mut errors = ErrorSet::new();

    if !user_repo.user_exists(user_id).await? {
        errors.put(
            ErrorTag::UserId,
            format!("User #{} could not be found", user_id),
        );
    }
    if !telescope_repo.telescope_exists(telescope_id).await? {
        errors.put(
            ErrorTag::TelescopeId,
            format!("Telescope #{} could not be found", telescope_id),
        );
    }

    Ok(errors)
}

/// Fast-path conflict detection for the proposed window.
///
/// Reports an `Overlap` violation when any non-canceled/non-denied
/// appointment on the telescope intersects the half-open window.
/// `exclude` removes the appointment being updated from consideration.
/// This pre-validation does not replace the storage-level exclusion
/// constraint, which remains the authoritative guard.
pub async fn validate_no_conflicts(
    appointment_repo: &dyn AppointmentRepository,
    telescope_id: TelescopeId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<AppointmentId>,
) -> RepositoryResult<ErrorSet> {
    let conflicts = appointment_repo
        .find_conflicts(telescope_id, start, end, exclude)
        .await?;

    let mut errors = ErrorSet::new();
    for conflict in conflicts {
        errors.put(
            ErrorTag::Overlap,
            format!(
                "Appointment conflicts with appointment #{} ({} - {})",
                conflict.id, conflict.start_time, conflict.end_time
            ),
        );
    }

    Ok(errors)
}

/// Quota check against the user's allotted time cap.
///
/// The sum of the user's scheduled (non-canceled/non-denied) seconds,
/// minus `already_counted_seconds` (the current duration of the
/// appointment being updated, zero on create), plus the proposed
/// duration must not exceed the cap. An absent or zero cap never
/// rejects.
pub async fn validate_allotted_time(
    appointment_repo: &dyn AppointmentRepository,
    cap_repo: &dyn AllottedTimeCapRepository,
    user_id: UserId,
    proposed_seconds: i64,
    already_counted_seconds: i64,
) -> RepositoryResult<ErrorSet> {
    let mut errors = ErrorSet::new();

    let limit = cap_repo
        .cap_for_user(user_id)
        .await?
        .and_then(|cap| cap.effective_limit());

    if let Some(limit) = limit {
        let scheduled = appointment_repo.total_scheduled_seconds(user_id).await?;
        let projected = scheduled - already_counted_seconds + proposed_seconds;
        if projected > limit {
            errors.put(
                ErrorTag::AvailableTime,
                format!(
                    "Appointment exceeds the user's allotted time \
                     ({} of {} seconds already scheduled)",
                    scheduled - already_counted_seconds,
                    limit
                ),
            );
        }
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let errors = validate_time_window(at(11, 0), at(10, 0), at(9, 0));
        assert!(errors.contains(ErrorTag::EndTime));
    }

    #[test]
    fn test_equal_start_and_end_is_rejected() {
        let errors = validate_time_window(at(10, 0), at(10, 0), at(9, 0));
        assert!(errors.contains(ErrorTag::EndTime));
    }

    #[test]
    fn test_start_in_the_past_is_rejected() {
        let errors = validate_time_window(at(8, 0), at(10, 0), at(9, 0));
        assert!(errors.contains(ErrorTag::StartTime));
    }

    #[test]
    fn test_start_equal_to_now_is_accepted() {
        let now = at(9, 0);
        let errors = validate_time_window(now, now + Duration::hours(1), now);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_past_start_and_inverted_order_both_reported() {
        let errors = validate_time_window(at(8, 0), at(7, 0), at(9, 0));
        assert!(errors.contains(ErrorTag::StartTime));
        assert!(errors.contains(ErrorTag::EndTime));
    }

    #[test]
    fn test_coordinate_bounds_accumulate_independently() {
        let errors = validate_coordinate(24, 60, 60, 91.0);
        assert!(errors.contains(ErrorTag::Hours));
        assert!(errors.contains(ErrorTag::Minutes));
        assert!(errors.contains(ErrorTag::Seconds));
        assert!(errors.contains(ErrorTag::Declination));
        assert_eq!(errors.tag_count(), 4);
    }

    #[test]
    fn test_coordinate_boundary_values() {
        assert!(validate_coordinate(0, 0, 0, -90.0).is_empty());
        assert!(validate_coordinate(23, 59, 59, 90.0).is_empty());
        assert!(validate_coordinate(-1, 0, 0, 0.0).contains(ErrorTag::Hours));
        assert!(validate_coordinate(0, 0, 0, -90.5).contains(ErrorTag::Declination));
    }
}
