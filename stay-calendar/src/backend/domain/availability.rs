//! Availability index for one listing's (or one user's) reservations.
//!
//! The index is a pure snapshot of a reservation list: which calendar days are
//! blocked and which reservation ranges block them. It is rebuilt from scratch
//! whenever the list changes and never patched in place.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::{CalendarConfig, DateKey, Reservation, UnavailabilityRange};
use std::collections::BTreeSet;

use super::date_utils::{days_between, days_in_month, first_of_month, parse_date_value, stay_dates};

/// Blocked days and the ranges that produce them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityIndex {
    blocked_days: BTreeSet<DateKey>,
    /// In the order of the source reservation list
    ranges: Vec<UnavailabilityRange>,
}

impl AvailabilityIndex {
    /// Build an index using the default blocking statuses (pending, confirmed)
    pub fn build(reservations: &[Reservation]) -> Self {
        Self::build_with_config(reservations, &CalendarConfig::default())
    }

    /// Build an index, treating only `config.blocking_statuses` as occupying
    /// the calendar. Reservations with unusable dates are skipped.
    pub fn build_with_config(reservations: &[Reservation], config: &CalendarConfig) -> Self {
        let mut blocked_days = BTreeSet::new();
        let mut ranges = Vec::new();

        for reservation in reservations {
            if !config.is_blocking(&reservation.status) {
                continue;
            }

            let (start, end) = match stay_dates(reservation) {
                Ok(dates) => dates,
                Err(e) => {
                    warn!("⚠️ Skipping reservation in availability index: {}", e);
                    continue;
                }
            };

            blocked_days.extend(days_between(start, end).map(DateKey::new));
            ranges.push(UnavailabilityRange {
                reservation_id: reservation.id.clone(),
                start,
                end,
                status: reservation.status.clone(),
            });
        }

        if config.enable_debug_logging {
            debug!(
                "🗓️ Availability index built: {} reservations in, {} ranges, {} blocked days",
                reservations.len(),
                ranges.len(),
                blocked_days.len()
            );
        }

        Self { blocked_days, ranges }
    }

    pub fn blocked_days(&self) -> &BTreeSet<DateKey> {
        &self.blocked_days
    }

    pub fn ranges(&self) -> &[UnavailabilityRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn is_blocked(&self, key: DateKey) -> bool {
        self.blocked_days.contains(&key)
    }

    /// Whether the proposed stay `[start, end)` touches any active reservation.
    ///
    /// Returns `false` while either date is still missing; callers treat that
    /// as "not ready to check", not as "available". The per-day lookup and the
    /// range overlap test should always agree; both are evaluated.
    pub fn has_conflict(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => return false,
        };

        let day_blocked = days_between(start, end).any(|day| self.is_blocked(DateKey::new(day)));
        let range_overlaps = self.ranges.iter().any(|range| range.overlaps(start, end));

        day_blocked || range_overlaps
    }

    /// Conflict check over raw date-input values. Unparsable input counts as
    /// absent.
    pub fn check_date_conflict(&self, check_in: &str, check_out: &str) -> bool {
        self.has_conflict(parse_date_value(check_in), parse_date_value(check_out))
    }

    /// First range, in reservation-list order, that occupies `key`
    pub fn range_covering(&self, key: DateKey) -> Option<&UnavailabilityRange> {
        self.ranges.iter().find(|range| range.covers(key.date()))
    }

    /// Blocked days falling inside a zero-based month
    pub fn blocked_days_in_month(&self, month0: u32, year: i32) -> Vec<DateKey> {
        let (first, days) = match (first_of_month(month0, year), days_in_month(month0, year)) {
            (Some(first), Some(days)) => (first, days),
            _ => return Vec::new(),
        };
        let Some(last) = first.with_day0(days - 1) else {
            return Vec::new();
        };

        self.blocked_days
            .range(DateKey::new(first)..=DateKey::new(last))
            .copied()
            .collect()
    }
}
