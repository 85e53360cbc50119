use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the availability and calendar domain.
///
/// Overlaps are not errors: they are reported as a
/// [`ConflictWarning`](crate::backend::domain::ConflictWarning) and never stop
/// a state change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("Reservation {id} has unusable dates: {reason}")]
    MalformedReservation { id: String, reason: String },

    #[error("Check-out must be after check-in ({check_in}); {requested} is not")]
    InvalidRangeSelection {
        check_in: NaiveDate,
        requested: NaiveDate,
    },

    #[error("Invalid month: {0}. Must be between 0 and 11")]
    InvalidMonth(u32),

    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Day {day} does not exist in {month}/{year}")]
    InvalidDay { day: u32, month: u32, year: i32 },

    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),
}

pub type CalendarResult<T> = Result<T, CalendarError>;
