//! Calendar navigation for the listing and dashboard views.
//!
//! This module owns the month-at-a-time view state and turns any month into a
//! grid of cells annotated from the current availability snapshot. The UI only
//! draws what [`CalendarNavigator::month_grid`] returns.

use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use shared::{CalendarCell, CalendarConfig, CalendarMonth, CalendarViewState, DateKey, DayCell};
use std::fmt;
use std::sync::Arc;

use super::availability::AvailabilityIndex;
use super::date_utils::{self, days_in_month, first_of_month, first_weekday, month_name};
use super::range_picker::{DateInputOutcome, RangePicker, SelectionChange};
use crate::error::{CalendarError, CalendarResult};

/// Receives `(day, month_1_based, year)` whenever a day is clicked in
/// standalone mode
pub type DayClickCallback = Box<dyn FnMut(u32, u32, i32)>;

/// Source of the current local date, consulted on every render and click
pub type Clock = Box<dyn Fn() -> NaiveDate>;

/// How day clicks are interpreted
#[derive(Debug, Clone)]
pub enum CalendarMode {
    /// Display calendar; clicks select a single day and notify the host view
    Standalone,
    /// Booking calendar; clicks drive the check-in/check-out picker
    RangePicker(RangePicker),
}

/// Result of [`CalendarNavigator::select_day`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayClickOutcome {
    Selected(NaiveDate),
    Range(SelectionChange),
}

pub struct CalendarNavigator {
    view: CalendarViewState,
    clock: Clock,
    index: Arc<AvailabilityIndex>,
    mode: CalendarMode,
    on_day_click: Option<DayClickCallback>,
}

impl CalendarNavigator {
    /// Navigator on the system clock, showing the current month
    pub fn new(index: Arc<AvailabilityIndex>) -> Self {
        Self::with_clock(date_utils::today, index)
    }

    /// Navigator frozen on `today`
    pub fn starting_at(today: NaiveDate, index: Arc<AvailabilityIndex>) -> Self {
        Self::with_clock(move || today, index)
    }

    /// Navigator reading the current date from `clock`, showing its month
    pub fn with_clock(clock: impl Fn() -> NaiveDate + 'static, index: Arc<AvailabilityIndex>) -> Self {
        let today = clock();
        Self {
            view: CalendarViewState {
                month: today.month0(),
                year: today.year(),
                selected_date: None,
            },
            clock: Box::new(clock),
            index,
            mode: CalendarMode::Standalone,
            on_day_click: None,
        }
    }

    /// Switch to booking mode with a fresh picker
    pub fn with_range_picker(mut self, config: &CalendarConfig) -> Self {
        self.mode = CalendarMode::RangePicker(RangePicker::with_config(config));
        self
    }

    pub fn set_on_day_click(&mut self, callback: impl FnMut(u32, u32, i32) + 'static) {
        self.on_day_click = Some(Box::new(callback));
    }

    pub fn view(&self) -> &CalendarViewState {
        &self.view
    }

    /// Zero-based displayed month
    pub fn month(&self) -> u32 {
        self.view.month
    }

    pub fn year(&self) -> i32 {
        self.view.year
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn mode(&self) -> &CalendarMode {
        &self.mode
    }

    pub fn range_picker(&self) -> Option<&RangePicker> {
        match &self.mode {
            CalendarMode::RangePicker(picker) => Some(picker),
            CalendarMode::Standalone => None,
        }
    }

    pub fn index(&self) -> &Arc<AvailabilityIndex> {
        &self.index
    }

    /// Swap in a freshly built availability snapshot
    pub fn set_index(&mut self, index: Arc<AvailabilityIndex>) {
        self.index = index;
    }

    /// Previous month; stays put at the earliest representable month
    pub fn prev(&mut self) {
        let target = if self.view.month == 0 {
            self.view.year.checked_sub(1).map(|year| (11, year))
        } else {
            Some((self.view.month - 1, self.view.year))
        };
        self.move_to(target, "previous");
    }

    /// Next month; stays put at the latest representable month
    pub fn next(&mut self) {
        let target = if self.view.month == 11 {
            self.view.year.checked_add(1).map(|year| (0, year))
        } else {
            Some((self.view.month + 1, self.view.year))
        };
        self.move_to(target, "next");
    }

    fn move_to(&mut self, target: Option<(u32, i32)>, direction: &str) {
        match target.filter(|&(month0, year)| first_of_month(month0, year).is_some()) {
            Some((month0, year)) => {
                self.view.month = month0;
                self.view.year = year;
                info!("📅 Navigated to {} month: {}", direction, self.month_label());
            }
            None => warn!(
                "⚠️ Cannot move to the {} month from {}, outside the supported range",
                direction,
                self.month_label()
            ),
        }
    }

    /// Show the month containing the current date
    pub fn jump_to_today(&mut self) {
        let today = self.today();
        self.view.month = today.month0();
        self.view.year = today.year();
        info!("📅 Jumped to today: {}", today);
    }

    /// Show an explicit month, as requested by the hosting view
    pub fn set_view(&mut self, month0: u32, year: i32) -> CalendarResult<()> {
        if month0 > 11 {
            return Err(CalendarError::InvalidMonth(month0));
        }
        if first_of_month(month0, year).is_none() {
            return Err(CalendarError::InvalidYear(year));
        }
        self.view.month = month0;
        self.view.year = year;
        Ok(())
    }

    /// e.g. "June 2024"
    pub fn month_label(&self) -> String {
        format!("{} {}", month_name(self.view.month), self.view.year)
    }

    /// Grid for the displayed month
    pub fn current_grid(&self) -> CalendarResult<CalendarMonth> {
        self.month_grid(self.view.month, self.view.year)
    }

    /// Grid for an arbitrary zero-based month: leading blanks for the weekday
    /// of day 1 (Sunday first), then one annotated cell per day.
    pub fn month_grid(&self, month0: u32, year: i32) -> CalendarResult<CalendarMonth> {
        if month0 > 11 {
            return Err(CalendarError::InvalidMonth(month0));
        }
        let (first_weekday, days_in_month) =
            match (first_weekday(month0, year), days_in_month(month0, year)) {
                (Some(weekday), Some(days)) => (weekday, days),
                _ => return Err(CalendarError::InvalidYear(year)),
            };
        let today = self.today();

        let mut cells = Vec::with_capacity((first_weekday + days_in_month) as usize);
        cells.extend((0..first_weekday).map(|_| CalendarCell::Blank));

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month0 + 1, day)
                .ok_or(CalendarError::InvalidDay { day, month: month0 + 1, year })?;
            cells.push(CalendarCell::Day(self.day_cell(date, today)));
        }

        Ok(CalendarMonth {
            month: month0,
            year,
            first_weekday,
            days_in_month,
            cells,
        })
    }

    /// Click on `day` of the displayed month.
    ///
    /// Standalone mode records the selection and reports the click with a
    /// 1-based month. Booking mode hands the click to the range picker.
    pub fn select_day(&mut self, day: u32) -> CalendarResult<DayClickOutcome> {
        let (month0, year) = (self.view.month, self.view.year);
        let date = NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or(CalendarError::InvalidDay {
            day,
            month: month0 + 1,
            year,
        })?;
        let cell = self.day_cell(date, self.today());

        match &mut self.mode {
            CalendarMode::Standalone => {
                self.view.selected_date = Some(date);
                if let Some(callback) = self.on_day_click.as_mut() {
                    callback(day, month0 + 1, year);
                }
                info!("📅 Selected day: {}", date);
                Ok(DayClickOutcome::Selected(date))
            }
            CalendarMode::RangePicker(picker) => picker
                .click_day(date, cell.is_past, cell.is_unavailable)
                .map(DayClickOutcome::Range),
        }
    }

    /// Direct check-in input in booking mode; `None` in standalone mode
    pub fn set_check_in_input(&mut self, date: NaiveDate) -> Option<DateInputOutcome> {
        match &mut self.mode {
            CalendarMode::RangePicker(picker) => Some(picker.set_check_in_input(date, &self.index)),
            CalendarMode::Standalone => None,
        }
    }

    /// Direct check-out input in booking mode; `None` in standalone mode
    pub fn set_check_out_input(&mut self, date: NaiveDate) -> Option<CalendarResult<DateInputOutcome>> {
        match &mut self.mode {
            CalendarMode::RangePicker(picker) => Some(picker.set_check_out_input(date, &self.index)),
            CalendarMode::Standalone => None,
        }
    }

    fn day_cell(&self, date: NaiveDate, today: NaiveDate) -> DayCell {
        let key = DateKey::new(date);
        let in_range_selection = self
            .range_picker()
            .map(|picker| picker.selection().is_endpoint(date))
            .unwrap_or(false);

        DayCell {
            day: date.day(),
            date,
            is_today: date == today,
            is_past: date < today,
            is_selected: self.view.selected_date == Some(date) || in_range_selection,
            is_unavailable: self.index.is_blocked(key),
            covering_range: self.index.range_covering(key).cloned(),
        }
    }
}

impl fmt::Debug for CalendarNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarNavigator")
            .field("view", &self.view)
            .field("today", &self.today())
            .field("mode", &self.mode)
            .field("blocked_days", &self.index.blocked_days().len())
            .field("has_day_click_callback", &self.on_day_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Reservation;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_reservation(id: &str, check_in: &str, check_out: &str, status: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            listing_id: "listing-1".to_string(),
            guest_id: "guest-1".to_string(),
            host_id: "host-1".to_string(),
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            status: status.to_string(),
            guest_name: Some("Sam".to_string()),
            total_price: Some(420.0),
        }
    }

    fn june_navigator() -> CalendarNavigator {
        let index = AvailabilityIndex::build(&[create_test_reservation(
            "stay",
            "2024-06-20",
            "2024-06-23",
            "Confirmed",
        )]);
        CalendarNavigator::starting_at(date(2024, 6, 15), Arc::new(index))
    }

    #[test]
    fn test_january_2024_grid() {
        let navigator = june_navigator();
        let grid = navigator.month_grid(0, 2024).unwrap();

        assert_eq!(grid.first_weekday, 1); // Monday
        assert_eq!(grid.blank_count(), 1);
        assert_eq!(grid.day_cells().count(), 31);
        assert_eq!(grid.cells.len(), 32);
        assert!(matches!(grid.cells[0], CalendarCell::Blank));
        assert_eq!(grid.day_cells().last().unwrap().day, 31);
    }

    #[test]
    fn test_february_leap_year_grid() {
        let navigator = june_navigator();
        assert_eq!(navigator.month_grid(1, 2024).unwrap().day_cells().count(), 29);
        assert_eq!(navigator.month_grid(1, 2023).unwrap().day_cells().count(), 28);
        assert_eq!(navigator.month_grid(1, 2024).unwrap().days_in_month, 29);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let navigator = june_navigator();
        assert_eq!(navigator.month_grid(12, 2024), Err(CalendarError::InvalidMonth(12)));
    }

    #[test]
    fn test_grid_flags() {
        let navigator = june_navigator();
        let grid = navigator.current_grid().unwrap();

        assert_eq!(grid.month, 5);
        assert_eq!(grid.blank_count(), 6); // June 2024 starts on Saturday

        let fourteenth = grid.day(14).unwrap();
        assert!(fourteenth.is_past);
        assert!(!fourteenth.is_today);

        let fifteenth = grid.day(15).unwrap();
        assert!(fifteenth.is_today);
        assert!(!fifteenth.is_past);

        let booked = grid.day(21).unwrap();
        assert!(booked.is_unavailable);
        assert!(!booked.is_clickable());
        let range = booked.covering_range.as_ref().unwrap();
        assert_eq!(range.reservation_id, "stay");
        assert_eq!(range.status, "Confirmed");

        let departure = grid.day(23).unwrap();
        assert!(!departure.is_unavailable);
        assert!(departure.covering_range.is_none());
        assert!(departure.is_clickable());
    }

    #[test]
    fn test_navigation_wraps_years() {
        let mut navigator = june_navigator();
        navigator.set_view(0, 2025).unwrap();
        navigator.prev();
        assert_eq!((navigator.month(), navigator.year()), (11, 2024));
        navigator.next();
        assert_eq!((navigator.month(), navigator.year()), (0, 2025));

        navigator.set_view(11, 2025).unwrap();
        navigator.next();
        assert_eq!((navigator.month(), navigator.year()), (0, 2026));
        assert_eq!(navigator.month_label(), "January 2026");

        assert!(navigator.set_view(12, 2025).is_err());
    }

    #[test]
    fn test_jump_to_today_uses_system_date() {
        let mut navigator = CalendarNavigator::new(Arc::new(AvailabilityIndex::default()));
        navigator.set_view(0, 1999).unwrap();
        navigator.jump_to_today();

        let now = chrono::Local::now();
        assert_eq!(navigator.month(), now.month0());
        assert_eq!(navigator.year(), now.year());
        assert_eq!(navigator.today(), now.date_naive());

        let mut frozen = june_navigator();
        frozen.set_view(0, 1999).unwrap();
        frozen.jump_to_today();
        assert_eq!((frozen.month(), frozen.year()), (5, 2024));
    }

    #[test]
    fn test_day_rolls_into_past_when_clock_advances() {
        let now = Rc::new(Cell::new(date(2024, 6, 15)));
        let clock = Rc::clone(&now);
        let mut navigator =
            CalendarNavigator::with_clock(move || clock.get(), Arc::new(AvailabilityIndex::default()))
                .with_range_picker(&CalendarConfig::default());

        let grid = navigator.current_grid().unwrap();
        assert!(grid.day(15).unwrap().is_today);
        assert!(!grid.day(15).unwrap().is_past);

        // Midnight passes while the view stays open
        now.set(date(2024, 6, 16));

        let grid = navigator.current_grid().unwrap();
        assert!(grid.day(15).unwrap().is_past);
        assert!(!grid.day(15).unwrap().is_clickable());
        assert!(grid.day(16).unwrap().is_today);
        assert_eq!(navigator.today(), date(2024, 6, 16));
        assert_eq!(
            navigator.select_day(15).unwrap(),
            DayClickOutcome::Range(SelectionChange::Ignored)
        );
        assert_eq!(navigator.range_picker().unwrap().check_in(), None);
    }

    #[test]
    fn test_unrepresentable_year_is_rejected() {
        let navigator = june_navigator();
        assert_eq!(navigator.month_grid(11, i32::MAX), Err(CalendarError::InvalidYear(i32::MAX)));
        assert_eq!(navigator.month_grid(0, i32::MIN), Err(CalendarError::InvalidYear(i32::MIN)));

        let last = NaiveDate::MAX;
        let grid = navigator.month_grid(last.month0(), last.year()).unwrap();
        assert_eq!(grid.days_in_month, 31);

        let mut navigator = june_navigator();
        assert_eq!(navigator.set_view(0, i32::MAX), Err(CalendarError::InvalidYear(i32::MAX)));
        assert_eq!((navigator.month(), navigator.year()), (5, 2024));
    }

    #[test]
    fn test_navigation_stops_at_calendar_limits() {
        let mut navigator = june_navigator();
        let last = NaiveDate::MAX;
        navigator.set_view(last.month0(), last.year()).unwrap();
        navigator.next();
        assert_eq!((navigator.month(), navigator.year()), (last.month0(), last.year()));
        navigator.prev();
        assert_eq!((navigator.month(), navigator.year()), (last.month0() - 1, last.year()));

        let first = NaiveDate::MIN;
        navigator.set_view(first.month0(), first.year()).unwrap();
        navigator.prev();
        assert_eq!((navigator.month(), navigator.year()), (first.month0(), first.year()));
    }

    #[test]
    fn test_standalone_click_reports_one_based_month() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut navigator = june_navigator();
        let sink = Rc::clone(&clicks);
        navigator.set_on_day_click(move |day, month, year| sink.borrow_mut().push((day, month, year)));

        let outcome = navigator.select_day(21).unwrap();
        assert_eq!(outcome, DayClickOutcome::Selected(date(2024, 6, 21)));
        assert_eq!(*clicks.borrow(), vec![(21, 6, 2024)]);
        assert_eq!(navigator.view().selected_date, Some(date(2024, 6, 21)));
        assert!(navigator.current_grid().unwrap().day(21).unwrap().is_selected);

        assert!(matches!(navigator.select_day(31), Err(CalendarError::InvalidDay { .. })));
        assert_eq!(clicks.borrow().len(), 1);
    }

    #[test]
    fn test_range_mode_click_flow() {
        let mut navigator = june_navigator().with_range_picker(&CalendarConfig::default());

        // Past and booked days are inert
        assert_eq!(navigator.select_day(10).unwrap(), DayClickOutcome::Range(SelectionChange::Ignored));
        assert_eq!(navigator.select_day(21).unwrap(), DayClickOutcome::Range(SelectionChange::Ignored));

        assert_eq!(
            navigator.select_day(16).unwrap(),
            DayClickOutcome::Range(SelectionChange::CheckInSet(date(2024, 6, 16)))
        );
        assert_eq!(
            navigator.select_day(17).unwrap(),
            DayClickOutcome::Range(SelectionChange::CheckOutSnapped {
                requested: date(2024, 6, 17),
                check_out: date(2024, 6, 18),
            })
        );

        let grid = navigator.current_grid().unwrap();
        assert!(grid.day(16).unwrap().is_selected);
        assert!(grid.day(18).unwrap().is_selected);
        assert!(!grid.day(17).unwrap().is_selected);
        assert_eq!(navigator.view().selected_date, None);
    }

    #[test]
    fn test_range_mode_direct_input_checks_conflicts() {
        let mut navigator = june_navigator().with_range_picker(&CalendarConfig::default());
        navigator.set_check_out_input(date(2024, 6, 24)).unwrap().unwrap();

        let outcome = navigator.set_check_in_input(date(2024, 6, 19)).unwrap();
        assert!(outcome.conflict.is_some());

        let mut standalone = june_navigator();
        assert!(standalone.set_check_in_input(date(2024, 6, 19)).is_none());
    }

    #[test]
    fn test_set_index_refreshes_grid() {
        let mut navigator = june_navigator();
        assert!(navigator.current_grid().unwrap().day(21).unwrap().is_unavailable);

        navigator.set_index(Arc::new(AvailabilityIndex::default()));
        assert!(!navigator.current_grid().unwrap().day(21).unwrap().is_unavailable);
    }
}
