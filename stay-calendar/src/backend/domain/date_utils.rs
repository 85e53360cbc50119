//! Date helpers shared by the availability index, the navigator and the
//! range picker.
//!
//! Everything here works on `NaiveDate` calendar days in the local timezone.
//! Stepping is done one calendar day at a time, so daylight-saving changes
//! never shift a stay by a day.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeZone};
use shared::Reservation;

use crate::error::{CalendarError, CalendarResult};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar day of a timestamp as seen from the local timezone
pub fn to_local_day<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Parse a date-like value into a local calendar day.
///
/// Accepts `YYYY-MM-DD`, naive date-times (the date part is used as-is) and
/// RFC 3339 timestamps (converted to local time first).
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(to_local_day(&timestamp));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.date());
        }
    }

    None
}

/// Check-in and check-out days of a reservation.
///
/// Fails when either value is missing or unparsable, or when the stay has no
/// nights at all.
pub fn stay_dates(reservation: &Reservation) -> CalendarResult<(NaiveDate, NaiveDate)> {
    let malformed = |reason: &str| CalendarError::MalformedReservation {
        id: reservation.id.clone(),
        reason: reason.to_string(),
    };

    let check_in = reservation
        .check_in
        .as_deref()
        .ok_or_else(|| malformed("missing check-in"))?;
    let check_out = reservation
        .check_out
        .as_deref()
        .ok_or_else(|| malformed("missing check-out"))?;

    let start = parse_date_value(check_in)
        .ok_or_else(|| malformed(&format!("unparsable check-in '{}'", check_in)))?;
    let end = parse_date_value(check_out)
        .ok_or_else(|| malformed(&format!("unparsable check-out '{}'", check_out)))?;

    if end <= start {
        return Err(malformed("check-out is not after check-in"));
    }

    Ok((start, end))
}

/// Every day of the half-open span `[start, end)`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day < end)
}

pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

/// First day of a zero-based month
pub fn first_of_month(month0: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)
}

/// Number of days in a zero-based month: the day before the first of the
/// following month, or 31 for December. `None` when chrono cannot represent
/// the month.
pub fn days_in_month(month0: u32, year: i32) -> Option<u32> {
    let first = first_of_month(month0, year)?;
    let last = if month0 == 11 {
        first.with_day(31)
    } else {
        first_of_month(month0 + 1, year).and_then(|next| next.pred_opt())
    };
    last.map(|date| date.day())
}

/// Weekday of day 1 (0 = Sunday, 6 = Saturday)
pub fn first_weekday(month0: u32, year: i32) -> Option<u32> {
    first_of_month(month0, year).map(|date| date.weekday().num_days_from_sunday())
}

pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES
        .get(month0 as usize)
        .copied()
        .unwrap_or("Invalid Month")
}

/// Human-readable date, e.g. "June 13, 2025"
pub fn format_date_for_display(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month0()), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(check_in: Option<&str>, check_out: Option<&str>) -> Reservation {
        Reservation {
            id: "res-1".to_string(),
            listing_id: "listing-1".to_string(),
            guest_id: "guest-1".to_string(),
            host_id: "host-1".to_string(),
            check_in: check_in.map(str::to_string),
            check_out: check_out.map(str::to_string),
            status: "confirmed".to_string(),
            guest_name: None,
            total_price: None,
        }
    }

    #[test]
    fn test_parse_plain_and_naive_dates() {
        assert_eq!(parse_date_value("2024-06-10"), Some(date(2024, 6, 10)));
        assert_eq!(parse_date_value(" 2024-06-10 "), Some(date(2024, 6, 10)));
        assert_eq!(parse_date_value("2024-06-10T23:59:59"), Some(date(2024, 6, 10)));
        assert_eq!(parse_date_value("2024-06-10 00:00:01.250"), Some(date(2024, 6, 10)));
        assert_eq!(parse_date_value("not a date"), None);
        assert_eq!(parse_date_value(""), None);
    }

    #[test]
    fn test_parse_rfc3339_uses_local_day() {
        let raw = "2024-06-10T09:00:00-04:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_date_value(raw), Some(expected));
    }

    #[test]
    fn test_same_local_day_normalizes_to_same_key() {
        let morning = Local.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).single().unwrap();
        let evening = Local.with_ymd_and_hms(2024, 3, 10, 23, 55, 0).single().unwrap();
        assert_eq!(to_local_day(&morning), to_local_day(&evening));

        let as_utc = evening.with_timezone(&Utc);
        let as_fixed = evening.with_timezone(&FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(to_local_day(&as_utc), date(2024, 3, 10));
        assert_eq!(to_local_day(&as_fixed), date(2024, 3, 10));
    }

    #[test]
    fn test_stay_dates_rejects_bad_input() {
        assert_eq!(
            stay_dates(&reservation(Some("2024-05-01"), Some("2024-05-03"))).unwrap(),
            (date(2024, 5, 1), date(2024, 5, 3))
        );

        let missing = stay_dates(&reservation(None, Some("2024-05-03"))).unwrap_err();
        assert!(matches!(missing, CalendarError::MalformedReservation { ref reason, .. } if reason == "missing check-in"));

        assert!(stay_dates(&reservation(Some("2024-05-01"), None)).is_err());
        assert!(stay_dates(&reservation(Some("garbage"), Some("2024-05-03"))).is_err());
        assert!(stay_dates(&reservation(Some("2024-05-03"), Some("2024-05-03"))).is_err());
    }

    #[test]
    fn test_days_between_steps_calendar_days() {
        // US spring-forward weekend; stepping by day must not skip or repeat
        let days: Vec<_> = days_between(date(2024, 3, 9), date(2024, 3, 12)).collect();
        assert_eq!(days, vec![date(2024, 3, 9), date(2024, 3, 10), date(2024, 3, 11)]);

        assert_eq!(days_between(date(2024, 3, 9), date(2024, 3, 9)).count(), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(0, 2024), Some(31));
        assert_eq!(days_in_month(1, 2024), Some(29));
        assert_eq!(days_in_month(1, 2025), Some(28));
        assert_eq!(days_in_month(1, 1900), Some(28));
        assert_eq!(days_in_month(1, 2000), Some(29));
        assert_eq!(days_in_month(3, 2025), Some(30));
        assert_eq!(days_in_month(11, 2025), Some(31));
        assert_eq!(days_in_month(12, 2025), None);
    }

    #[test]
    fn test_unrepresentable_years_give_none() {
        assert_eq!(days_in_month(11, i32::MAX), None);
        assert_eq!(days_in_month(0, i32::MIN), None);
        assert_eq!(days_in_month(11, NaiveDate::MAX.year()), Some(31));
        assert_eq!(days_in_month(0, NaiveDate::MIN.year()), Some(31));
        assert_eq!(first_of_month(11, i32::MAX), None);
        assert_eq!(first_weekday(5, i32::MAX), None);
        assert_eq!(first_of_month(u32::MAX, 2024), None);
    }

    #[test]
    fn test_first_weekday() {
        assert_eq!(first_weekday(0, 2024), Some(1)); // Monday
        assert_eq!(first_weekday(8, 2024), Some(0)); // September 2024 starts on Sunday
        assert_eq!(first_weekday(5, 2024), Some(6)); // June 2024 starts on Saturday
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(add_days(date(2024, 2, 28), 2), Some(date(2024, 3, 1)));
        assert_eq!(add_days(date(2024, 12, 31), 1), Some(date(2025, 1, 1)));
    }

    #[test]
    fn test_month_name_and_display() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(11), "December");
        assert_eq!(month_name(12), "Invalid Month");
        assert_eq!(format_date_for_display(date(2025, 6, 13)), "June 13, 2025");
    }
}
