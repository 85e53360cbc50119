//! Availability index, month calendar and stay range picker for
//! short-term rental listings.
//!
//! Reservations arrive as snapshots from a [`ReservationSource`]; the
//! [`AvailabilityFeed`] turns each snapshot into an [`AvailabilityIndex`] that
//! the [`CalendarNavigator`] and [`RangePicker`] read from.

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{
    AvailabilityFeed, AvailabilityIndex, BookedDateOverlay, CalendarMode, CalendarNavigator,
    ConflictWarning, DateInputOutcome, DayClickOutcome, InMemoryReservationStore, RangePicker,
    ReservationFilter, ReservationSource, ReservationViewState, SelectionChange, ViewAction,
    ViewerRole,
};
pub use config::{load_config, save_config};
pub use error::{CalendarError, CalendarResult};
