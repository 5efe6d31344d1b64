//! Time slot model.
//!
//! A day is split into 48 fixed half-hour slots. Slot `i` starts `30 * i`
//! minutes past midnight.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const SLOTS_PER_DAY: usize = 48;
pub const SLOT_DURATION_MINUTES: u32 = 30;
pub const LAST_SLOT: usize = SLOTS_PER_DAY - 1;

/// A logged half-hour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique identifier (database primary key)
    pub id: i64,
    pub date: NaiveDate,
    pub slot_index: usize,
    pub category_id: i64,
    pub note: Option<String>,
}

/// Clamp an arbitrary signed position into the valid slot range.
pub fn clamp_slot(index: i64) -> usize {
    index.clamp(0, LAST_SLOT as i64) as usize
}

/// Start time of a slot. Indices past the end wrap to midnight.
pub fn slot_start_time(index: usize) -> NaiveTime {
    let minutes = (index % SLOTS_PER_DAY) as u32 * SLOT_DURATION_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Minutes from midnight to the start of the slot.
pub fn slot_offset_minutes(index: usize) -> u32 {
    index as u32 * SLOT_DURATION_MINUTES
}

fn twelve_hour(index: usize) -> (u32, u32, bool) {
    let hours = (index / 2) as u32;
    let minutes = (index % 2) as u32 * SLOT_DURATION_MINUTES;
    let is_pm = hours >= 12;
    let display = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    (display, minutes, is_pm)
}

/// Label such as `"9:30 AM"`.
pub fn slot_index_to_time(index: usize) -> String {
    let (hours, minutes, is_pm) = twelve_hour(index);
    let period = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hours, minutes, period)
}

/// Compact label such as `"9a"` or `"9:30a"`.
pub fn slot_index_to_time_short(index: usize) -> String {
    let (hours, minutes, is_pm) = twelve_hour(index);
    let period = if is_pm { "p" } else { "a" };
    if minutes == 0 {
        format!("{}{}", hours, period)
    } else {
        format!("{}:{:02}{}", hours, minutes, period)
    }
}

/// Label such as `"9:30 AM – 10:00 AM"`. The last slot ends at 12:00 AM.
pub fn slot_index_to_time_range(index: usize) -> String {
    let next = if index + 1 > LAST_SLOT { 0 } else { index + 1 };
    format!("{} – {}", slot_index_to_time(index), slot_index_to_time(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "12:00 AM"; "midnight")]
    #[test_case(1, "12:30 AM"; "half past midnight")]
    #[test_case(19, "9:30 AM"; "morning")]
    #[test_case(24, "12:00 PM"; "noon")]
    #[test_case(47, "11:30 PM"; "last slot")]
    fn test_slot_index_to_time(index: usize, expected: &str) {
        assert_eq!(slot_index_to_time(index), expected);
    }

    #[test]
    fn test_short_labels() {
        assert_eq!(slot_index_to_time_short(18), "9a");
        assert_eq!(slot_index_to_time_short(27), "1:30p");
    }

    #[test]
    fn test_time_range_wraps_after_last_slot() {
        assert_eq!(slot_index_to_time_range(47), "11:30 PM – 12:00 AM");
        assert_eq!(slot_index_to_time_range(2), "1:00 AM – 1:30 AM");
    }

    #[test]
    fn test_slot_start_time() {
        assert_eq!(slot_start_time(0), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(slot_start_time(33), NaiveTime::from_hms_opt(16, 30, 0).unwrap());
        assert_eq!(slot_offset_minutes(33), 990);
    }

    #[test]
    fn test_clamp_slot() {
        assert_eq!(clamp_slot(-1), 0);
        assert_eq!(clamp_slot(48), LAST_SLOT);
        assert_eq!(clamp_slot(12), 12);
    }
}
