//! # Domain Module
//!
//! Contains the booking-calendar rules for the rental marketplace views.
//!
//! Everything here is pure and synchronous: it takes a snapshot of
//! reservations and answers availability and calendar questions about it.
//! Storage, identity and rendering are handled elsewhere.
//!
//! ## Module Organization
//!
//! - **date_utils**: Local-day normalisation and calendar arithmetic
//! - **availability**: Blocked days and conflict checks for a reservation list
//! - **calendar**: Month navigation and grid generation
//! - **range_picker**: Check-in/check-out selection with minimum stay
//! - **booked_dates**: Status-priority overlay for host and guest dashboards
//! - **reservation_views**: Per-screen view state and its transitions
//! - **commands**: Query types used across the domain and storage seam
//!
//! ## Business Rules
//!
//! - Check-out is exclusive; a stay occupies `[check_in, check_out)`
//! - Only pending and confirmed reservations block the calendar
//! - Stays are at least two nights unless configured otherwise
//! - Conflicts warn, they never block a selection
//! - A check-out on or before check-in is rejected

pub mod availability;
pub mod booked_dates;
pub mod calendar;
pub mod commands;
pub mod date_utils;
pub mod range_picker;
pub mod reservation_views;

pub use availability::*;
pub use booked_dates::*;
pub use calendar::*;
pub use commands::reservations::ReservationFilter;
pub use range_picker::*;
pub use reservation_views::*;
