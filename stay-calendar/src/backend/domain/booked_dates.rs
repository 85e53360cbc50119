//! Booked-dates overlay for the host and guest dashboards.
//!
//! Unlike the availability index, the overlay does not drop declined
//! reservations first. Every reservation with usable dates marks its nights
//! and the highest-priority status wins on each day, so a pending request
//! still shows up on a day that also carries a declined one.

use chrono::NaiveDate;
use log::debug;
use shared::{DateKey, Reservation, ReservationStatus};
use std::collections::BTreeMap;

use super::date_utils::{days_between, stay_dates};

/// Display state of one marked day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBooking {
    pub status: ReservationStatus,
    /// Every reservation touching the day, in list order
    pub reservation_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDateOverlay {
    days: BTreeMap<DateKey, DayBooking>,
}

impl BookedDateOverlay {
    pub fn build(reservations: &[Reservation]) -> Self {
        let mut days: BTreeMap<DateKey, DayBooking> = BTreeMap::new();

        for reservation in reservations {
            let status = reservation.status_kind();
            if status.priority() == 0 {
                continue;
            }
            let Ok((start, end)) = stay_dates(reservation) else {
                debug!("Reservation {} has no usable dates, not shown on overlay", reservation.id);
                continue;
            };

            for day in days_between(start, end) {
                let entry = days.entry(DateKey::new(day)).or_insert_with(|| DayBooking {
                    status: status.clone(),
                    reservation_ids: Vec::new(),
                });
                if status.priority() > entry.status.priority() {
                    entry.status = status.clone();
                }
                entry.reservation_ids.push(reservation.id.clone());
            }
        }

        Self { days }
    }

    pub fn status_on(&self, key: DateKey) -> Option<&ReservationStatus> {
        self.days.get(&key).map(|booking| &booking.status)
    }

    pub fn booking_on(&self, key: DateKey) -> Option<&DayBooking> {
        self.days.get(&key)
    }

    pub fn reservations_on(&self, key: DateKey) -> &[String] {
        self.days
            .get(&key)
            .map(|booking| booking.reservation_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn marked_days(&self) -> impl Iterator<Item = (&DateKey, &DayBooking)> {
        self.days.iter()
    }

    /// Marked days within `[start, end)`
    pub fn marked_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<DateKey> {
        if end <= start {
            return Vec::new();
        }
        self.days
            .range(DateKey::new(start)..DateKey::new(end))
            .map(|(key, _)| *key)
            .collect()
    }
}
