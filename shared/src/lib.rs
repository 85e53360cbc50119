use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reservation document as delivered by the storage collaborator.
///
/// The core only ever reads snapshots of these; it never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    /// Listing the stay belongs to
    #[serde(default)]
    pub listing_id: String,
    /// User who requested the stay
    #[serde(default)]
    pub guest_id: String,
    /// Owner of the listing
    #[serde(default)]
    pub host_id: String,
    /// Date-like value for the first night (YYYY-MM-DD or RFC 3339)
    #[serde(default)]
    pub check_in: Option<String>,
    /// Date-like value for the departure day, exclusive
    #[serde(default)]
    pub check_out: Option<String>,
    /// Free-form status string, compared case-insensitively
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

impl Reservation {
    /// Parsed status; unknown strings are kept as `Other`.
    pub fn status_kind(&self) -> ReservationStatus {
        ReservationStatus::parse(&self.status)
    }
}

/// Known reservation statuses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Declined,
    Completed,
    RefundPending,
    Other(String),
}

impl ReservationStatus {
    /// Case-insensitive parse that never fails. Surrounding whitespace is
    /// significant, so `" pending "` is `Other`.
    pub fn parse(value: &str) -> Self {
        let lowered = value.to_lowercase();
        match lowered.as_str() {
            "pending" => ReservationStatus::Pending,
            "confirmed" => ReservationStatus::Confirmed,
            "declined" => ReservationStatus::Declined,
            "completed" => ReservationStatus::Completed,
            "refund_pending" => ReservationStatus::RefundPending,
            _ => ReservationStatus::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Declined => "declined",
            ReservationStatus::Completed => "completed",
            ReservationStatus::RefundPending => "refund_pending",
            ReservationStatus::Other(value) => value.as_str(),
        }
    }

    /// Display priority used by the dashboard overlay.
    /// Pending (3) > Confirmed (2) > Declined (1) > everything else (0).
    pub fn priority(&self) -> u8 {
        match self {
            ReservationStatus::Pending => 3,
            ReservationStatus::Confirmed => 2,
            ReservationStatus::Declined => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ReservationStatus::parse(&value))
    }
}

/// Canonical per-day key. Two timestamps on the same local calendar day
/// always produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

/// Half-open `[start, end)` span occupied by one active reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityRange {
    pub reservation_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Status exactly as stored on the reservation, for display
    pub status: String,
}

impl UnavailabilityRange {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start < self.end && end > self.start
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Annotated day inside a month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selected: bool,
    pub is_unavailable: bool,
    pub covering_range: Option<UnavailabilityRange>,
}

impl DayCell {
    /// Past and unavailable days ignore clicks.
    pub fn is_clickable(&self) -> bool {
        !self.is_past && !self.is_unavailable
    }
}

/// One slot of the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Leading padding before day 1
    Blank,
    Day(DayCell),
}

/// A rendered month: leading blanks followed by one cell per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Zero-based month (0 = January)
    pub month: u32,
    pub year: i32,
    pub first_weekday: u32, // 0 = Sunday, 1 = Monday, etc.
    pub days_in_month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn blank_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.day == day)
    }
}

/// Displayed month plus the standalone selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarViewState {
    /// Zero-based month (0-11)
    pub month: u32,
    pub year: i32,
    pub selected_date: Option<NaiveDate>,
}

impl Default for CalendarViewState {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month0(),
            year: now.year(),
            selected_date: None,
        }
    }
}

/// Check-in / check-out pair being picked by a guest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeSelection {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DateRangeSelection {
    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        self.check_in == Some(date) || self.check_out == Some(date)
    }
}

/// Tunables for availability and booking rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub min_stay_nights: u32,
    /// Lowercase statuses that occupy the calendar
    pub blocking_statuses: Vec<String>,
    pub enable_debug_logging: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            min_stay_nights: 2,
            blocking_statuses: vec!["pending".to_string(), "confirmed".to_string()],
            enable_debug_logging: false,
        }
    }
}

impl CalendarConfig {
    /// Exact match after lowercasing
    pub fn is_blocking(&self, status: &str) -> bool {
        let lowered = status.to_lowercase();
        self.blocking_statuses.iter().any(|s| *s == lowered)
    }
}
