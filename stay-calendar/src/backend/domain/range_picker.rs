//! Check-in / check-out selection for the booking calendar.
//!
//! Calendar clicks and direct date inputs both funnel through [`RangePicker`].
//! A check-out on or before check-in is rejected outright. Anything shorter
//! than the minimum stay is silently stretched to it. Overlaps with existing
//! reservations only produce a [`ConflictWarning`].

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{CalendarConfig, DateRangeSelection};

use super::availability::AvailabilityIndex;
use super::date_utils::{add_days, format_date_for_display};
use crate::error::{CalendarError, CalendarResult};

/// What a calendar click did to the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    /// Past or unavailable day; nothing changed
    Ignored,
    /// A new selection was started
    CheckInSet(NaiveDate),
    CheckOutSet(NaiveDate),
    /// The clicked day was too close to check-in and was moved out to the
    /// minimum stay
    CheckOutSnapped {
        requested: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Advisory overlap between the picked stay and existing reservations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictWarning {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub message: String,
}

impl ConflictWarning {
    fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
            message: format!(
                "Some dates between {} and {} are already booked",
                format_date_for_display(check_in),
                format_date_for_display(check_out)
            ),
        }
    }
}

/// Result of editing a date input directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInputOutcome {
    pub selection: DateRangeSelection,
    /// Check-out was moved to keep the minimum stay
    pub check_out_adjusted: bool,
    pub conflict: Option<ConflictWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangePicker {
    selection: DateRangeSelection,
    min_stay_nights: u32,
    /// Last user-facing message (rejection or conflict warning)
    message: Option<String>,
}

impl RangePicker {
    pub fn new() -> Self {
        Self::with_config(&CalendarConfig::default())
    }

    pub fn with_config(config: &CalendarConfig) -> Self {
        Self {
            selection: DateRangeSelection::default(),
            min_stay_nights: config.min_stay_nights,
            message: None,
        }
    }

    pub fn selection(&self) -> &DateRangeSelection {
        &self.selection
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.selection.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.selection.check_out
    }

    pub fn min_stay_nights(&self) -> u32 {
        self.min_stay_nights
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Nights in a complete selection
    pub fn nights(&self) -> Option<i64> {
        match (self.selection.check_in, self.selection.check_out) {
            (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_days()),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.selection = DateRangeSelection::default();
        self.message = None;
    }

    /// Handle a click on a calendar day.
    pub fn click_day(
        &mut self,
        date: NaiveDate,
        is_past: bool,
        is_unavailable: bool,
    ) -> CalendarResult<SelectionChange> {
        if is_past || is_unavailable {
            return Ok(SelectionChange::Ignored);
        }

        let check_in = match (self.selection.check_in, self.selection.check_out) {
            (Some(check_in), None) => check_in,
            _ => {
                self.selection = DateRangeSelection {
                    check_in: Some(date),
                    check_out: None,
                };
                self.message = None;
                info!("📅 Check-in selected: {}", date);
                return Ok(SelectionChange::CheckInSet(date));
            }
        };

        if date <= check_in {
            let error = CalendarError::InvalidRangeSelection {
                check_in,
                requested: date,
            };
            warn!("⚠️ {}", error);
            self.message = Some(error.to_string());
            return Err(error);
        }

        let earliest = self.earliest_check_out(check_in);
        self.message = None;
        if date < earliest {
            self.selection.check_out = Some(earliest);
            info!("📅 Check-out {} snapped to minimum stay: {}", date, earliest);
            Ok(SelectionChange::CheckOutSnapped {
                requested: date,
                check_out: earliest,
            })
        } else {
            self.selection.check_out = Some(date);
            info!("📅 Check-out selected: {}", date);
            Ok(SelectionChange::CheckOutSet(date))
        }
    }

    /// Set check-in from a date input. Check-out is pushed forward when it no
    /// longer leaves the minimum stay, then the stay is re-checked.
    pub fn set_check_in_input(&mut self, date: NaiveDate, index: &AvailabilityIndex) -> DateInputOutcome {
        self.selection.check_in = Some(date);

        let earliest = self.earliest_check_out(date);
        let check_out_adjusted = match self.selection.check_out {
            Some(check_out) if check_out < earliest => {
                self.selection.check_out = Some(earliest);
                true
            }
            _ => false,
        };

        self.finish_input(index, check_out_adjusted)
    }

    /// Set check-out from a date input.
    pub fn set_check_out_input(
        &mut self,
        date: NaiveDate,
        index: &AvailabilityIndex,
    ) -> CalendarResult<DateInputOutcome> {
        let mut check_out_adjusted = false;
        let mut check_out = date;

        if let Some(check_in) = self.selection.check_in {
            if date <= check_in {
                let error = CalendarError::InvalidRangeSelection {
                    check_in,
                    requested: date,
                };
                self.message = Some(error.to_string());
                return Err(error);
            }
            let earliest = self.earliest_check_out(check_in);
            if date < earliest {
                check_out = earliest;
                check_out_adjusted = true;
            }
        }

        self.selection.check_out = Some(check_out);
        Ok(self.finish_input(index, check_out_adjusted))
    }

    fn finish_input(&mut self, index: &AvailabilityIndex, check_out_adjusted: bool) -> DateInputOutcome {
        let conflict = match (self.selection.check_in, self.selection.check_out) {
            (Some(check_in), Some(check_out)) if index.has_conflict(Some(check_in), Some(check_out)) => {
                let warning = ConflictWarning::new(check_in, check_out);
                warn!("⚠️ {}", warning.message);
                Some(warning)
            }
            _ => None,
        };
        self.message = conflict.as_ref().map(|warning| warning.message.clone());

        DateInputOutcome {
            selection: self.selection.clone(),
            check_out_adjusted,
            conflict,
        }
    }

    fn earliest_check_out(&self, check_in: NaiveDate) -> NaiveDate {
        add_days(check_in, self.min_stay_nights).unwrap_or(NaiveDate::MAX)
    }
}

impl Default for RangePicker {
    fn default() -> Self {
        Self::new()
    }
}
