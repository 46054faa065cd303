//! Pure enrollment state machine.
//!
//! A course is `CLOSED`, `OPEN`, or `FULL`. The functions here compute the
//! next seat count and status for each mutation without touching the
//! database; the service applies the result inside one transaction.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "course_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CourseStatus {
    Closed,
    Open,
    Full,
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CourseStatus::Closed => "CLOSED",
            CourseStatus::Open => "OPEN",
            CourseStatus::Full => "FULL",
        };
        f.write_str(s)
    }
}

/// Rejected state transitions. Messages surface to the caller verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("The course is full")]
    CourseFull,
    #[error("The course is closed")]
    CourseClosed,
    #[error("The course has no free capacity to be opened")]
    NoFreeSeats,
}

/// Seat counters of a course row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seats {
    pub enrollments: i32,
    pub capacity: i32,
}

impl Seats {
    pub fn has_free(&self) -> bool {
        self.enrollments < self.capacity
    }
}

/// Teacher-initiated status change. Opening requires a free seat; closing
/// and marking full are always accepted.
pub fn change_status(
    requested: CourseStatus,
    seats: Seats,
) -> Result<CourseStatus, TransitionError> {
    if requested == CourseStatus::Open && !seats.has_free() {
        return Err(TransitionError::NoFreeSeats);
    }
    Ok(requested)
}

/// Student enrollment. Only an `OPEN` course with a free seat accepts
/// enrollments; reaching capacity flips the course to `FULL`.
///
/// The seat check is not redundant with the `FULL` status check: a course
/// can be created `OPEN` with `enrollments == capacity`, and the count must
/// never overshoot.
pub fn enroll(
    status: CourseStatus,
    seats: Seats,
) -> Result<(Seats, CourseStatus), TransitionError> {
    match status {
        CourseStatus::Full => Err(TransitionError::CourseFull),
        CourseStatus::Closed => Err(TransitionError::CourseClosed),
        CourseStatus::Open if !seats.has_free() => Err(TransitionError::CourseFull),
        CourseStatus::Open => {
            let next = Seats {
                enrollments: seats.enrollments + 1,
                capacity: seats.capacity,
            };
            let status = if next.enrollments == next.capacity {
                CourseStatus::Full
            } else {
                CourseStatus::Open
            };
            Ok((next, status))
        }
    }
}

/// Student unenrollment. Leaving a `FULL` course always reopens it, even if
/// the count was already below capacity through some other path; leaving an
/// `OPEN` course keeps it open regardless of the new count.
pub fn unenroll(
    status: CourseStatus,
    seats: Seats,
) -> Result<(Seats, CourseStatus), TransitionError> {
    if status == CourseStatus::Closed {
        return Err(TransitionError::CourseClosed);
    }

    let next = Seats {
        enrollments: seats.enrollments - 1,
        capacity: seats.capacity,
    };
    let status = if status == CourseStatus::Full {
        CourseStatus::Open
    } else {
        status
    };

    Ok((next, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(enrollments: i32, capacity: i32) -> Seats {
        Seats {
            enrollments,
            capacity,
        }
    }

    #[test]
    fn test_open_requires_free_seat() {
        assert_eq!(
            change_status(CourseStatus::Open, seats(3, 3)),
            Err(TransitionError::NoFreeSeats)
        );
        assert_eq!(
            change_status(CourseStatus::Open, seats(4, 3)),
            Err(TransitionError::NoFreeSeats)
        );
        assert_eq!(
            change_status(CourseStatus::Open, seats(2, 3)),
            Ok(CourseStatus::Open)
        );
    }

    #[test]
    fn test_close_and_full_always_accepted() {
        assert_eq!(
            change_status(CourseStatus::Closed, seats(3, 3)),
            Ok(CourseStatus::Closed)
        );
        assert_eq!(
            change_status(CourseStatus::Full, seats(0, 3)),
            Ok(CourseStatus::Full)
        );
    }

    #[test]
    fn test_enroll_rejected_when_full_or_closed() {
        assert_eq!(
            enroll(CourseStatus::Full, seats(3, 3)),
            Err(TransitionError::CourseFull)
        );
        assert_eq!(
            enroll(CourseStatus::Closed, seats(0, 3)),
            Err(TransitionError::CourseClosed)
        );
    }

    #[test]
    fn test_enroll_increments_and_stays_open() {
        let (next, status) = enroll(CourseStatus::Open, seats(0, 3)).unwrap();
        assert_eq!(next.enrollments, 1);
        assert_eq!(status, CourseStatus::Open);
    }

    #[test]
    fn test_enroll_fills_at_capacity() {
        let (next, status) = enroll(CourseStatus::Open, seats(2, 3)).unwrap();
        assert_eq!(next.enrollments, 3);
        assert_eq!(status, CourseStatus::Full);
    }

    #[test]
    fn test_capacity_one_fills_after_single_enroll() {
        let (next, status) = enroll(CourseStatus::Open, seats(0, 1)).unwrap();
        assert_eq!(next.enrollments, 1);
        assert_eq!(status, CourseStatus::Full);
    }

    #[test]
    fn test_enroll_rejected_when_open_without_free_seat() {
        assert_eq!(
            enroll(CourseStatus::Open, seats(1, 1)),
            Err(TransitionError::CourseFull)
        );
        assert_eq!(
            enroll(CourseStatus::Open, seats(3, 3)),
            Err(TransitionError::CourseFull)
        );
    }

    #[test]
    fn test_unenroll_rejected_when_closed() {
        assert_eq!(
            unenroll(CourseStatus::Closed, seats(2, 3)),
            Err(TransitionError::CourseClosed)
        );
    }

    #[test]
    fn test_unenroll_from_full_reopens() {
        let (next, status) = unenroll(CourseStatus::Full, seats(3, 3)).unwrap();
        assert_eq!(next.enrollments, 2);
        assert_eq!(status, CourseStatus::Open);
    }

    // Known asymmetry with the enroll rule: FULL -> OPEN on unenroll happens
    // regardless of whether the new count is still at capacity.
    #[test]
    fn test_unenroll_from_full_reopens_even_below_capacity() {
        let (next, status) = unenroll(CourseStatus::Full, seats(2, 3)).unwrap();
        assert_eq!(next.enrollments, 1);
        assert_eq!(status, CourseStatus::Open);
    }

    #[test]
    fn test_unenroll_from_open_stays_open() {
        let (next, status) = unenroll(CourseStatus::Open, seats(2, 3)).unwrap();
        assert_eq!(next.enrollments, 1);
        assert_eq!(status, CourseStatus::Open);
    }

    #[test]
    fn test_status_serde_uses_uppercase() {
        assert_eq!(
            serde_json::to_string(&CourseStatus::Closed).unwrap(),
            r#""CLOSED""#
        );
        let status: CourseStatus = serde_json::from_str(r#""FULL""#).unwrap();
        assert_eq!(status, CourseStatus::Full);
    }
}
