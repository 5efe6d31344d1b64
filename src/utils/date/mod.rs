// Date utility functions
// Dates are stored as `YYYY-MM-DD` text and weeks start on Monday.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn to_date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn from_date_string(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

/// Header text such as "Monday, Mar 3, 2025".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%A, %b %-d, %Y").to_string()
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

pub fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip_string() {
        let d = date(2025, 3, 7);
        assert_eq!(to_date_string(d), "2025-03-07");
        assert_eq!(from_date_string("2025-03-07").unwrap(), d);
        assert!(from_date_string("03/07/2025").is_err());
    }

    #[test]
    fn test_day_navigation_crosses_months() {
        assert_eq!(next_day(date(2024, 2, 29)), date(2024, 3, 1));
        assert_eq!(prev_day(date(2025, 1, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_week_bounds_start_on_monday() {
        // Sunday belongs to the week that started the previous Monday
        assert_eq!(week_start(date(2025, 3, 9)), date(2025, 3, 3));
        assert_eq!(week_start(date(2025, 3, 3)), date(2025, 3, 3));
        assert_eq!(week_end(date(2025, 3, 5)), date(2025, 3, 9));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format_display_date(date(2025, 3, 3)), "Monday, Mar 3, 2025");
    }
}
