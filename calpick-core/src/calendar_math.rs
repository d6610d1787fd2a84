//! Pure calendar arithmetic used to lay out a month.
//!
//! Weekdays are numbered 0 = Sunday .. 6 = Saturday throughout.

use std::ops::RangeInclusive;

use chrono::{Datelike, Months, NaiveDate};

/// Month names for the month picker.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Shown in place of an unset range endpoint.
pub const DATE_PLACEHOLDER: &str = "Select date";

/// Years offered by the year picker, relative to the current year.
const YEARS_BACK: i32 = 55;
const YEARS_AHEAD: i32 = 5;

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date` (the day before the 1st of
/// the following month).
pub fn days_in_month(date: NaiveDate) -> u32 {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Number of blank grid cells before day 1 of the month, given the weekday
/// each grid row starts on.
pub fn first_day_of_month(date: NaiveDate, first_day_of_week: u8) -> u8 {
    let weekday = month_start(date).weekday().num_days_from_sunday();
    let first = u32::from(first_day_of_week % 7);
    ((7 + weekday - first) % 7) as u8
}

/// First day of the month `delta` months away from the month containing `date`.
/// Returns `None` past the representable calendar.
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let start = month_start(date);
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    }
}

/// First day of month `month_index` (0-based) of `year`. Indices outside
/// 0..=11 roll over into neighbouring years, so 12 is January of `year + 1`
/// and -1 is December of `year - 1`.
pub fn month_from_index(year: i32, month_index: i32) -> Option<NaiveDate> {
    let total = i64::from(year) * 12 + i64::from(month_index);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Years offered by the year picker: 55 back and 5 ahead of `current_year`.
pub fn year_range(current_year: i32) -> RangeInclusive<i32> {
    (current_year - YEARS_BACK)..=(current_year + YEARS_AHEAD)
}

/// Short US-English rendering, e.g. "Jan 1, 2024".
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Endpoint with its time of day, e.g. "Jan 1, 2024 at 09:00".
/// The time is only shown when the date is set.
pub fn format_date_time(date: Option<NaiveDate>, time: &str) -> String {
    match date {
        Some(_) => format!("{} at {}", format_date(date), time),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Name of the month containing `date`.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_names_in_order() {
        assert_eq!(MONTH_NAMES.len(), 12);
        assert_eq!(MONTH_NAMES[0], "January");
        assert_eq!(MONTH_NAMES[11], "December");
        assert_eq!(month_name(day(2024, 6, 15)), "June");
    }

    #[test]
    fn days_in_month_handles_month_lengths() {
        assert_eq!(days_in_month(day(2024, 1, 1)), 31);
        assert_eq!(days_in_month(day(2024, 4, 1)), 30);
        assert_eq!(days_in_month(day(2024, 12, 31)), 31);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(day(2024, 2, 1)), 29);
        assert_eq!(days_in_month(day(2023, 2, 1)), 28);
        assert_eq!(days_in_month(day(2000, 2, 10)), 29);
        assert_eq!(days_in_month(day(1900, 2, 10)), 28);
    }

    #[test]
    fn days_in_month_ignores_day_of_month() {
        assert_eq!(days_in_month(day(2024, 2, 29)), 29);
    }

    #[test]
    fn first_day_offset_for_sunday_start() {
        // January 1, 2024 is a Monday
        assert_eq!(first_day_of_month(day(2024, 1, 1), 0), 1);
        // February 1, 2024 is a Thursday
        assert_eq!(first_day_of_month(day(2024, 2, 1), 0), 4);
    }

    #[test]
    fn first_day_offset_for_monday_start() {
        assert_eq!(first_day_of_month(day(2024, 1, 1), 1), 0);
        // September 1, 2024 is a Sunday, so it lands in the last column
        assert_eq!(first_day_of_month(day(2024, 9, 1), 1), 6);
    }

    #[test]
    fn first_day_offset_uses_the_first_of_the_month() {
        assert_eq!(first_day_of_month(day(2024, 1, 20), 0), 1);
    }

    #[test]
    fn first_day_offset_for_saturday_start() {
        assert_eq!(first_day_of_month(day(2024, 1, 1), 6), 2);
    }

    #[test]
    fn shift_month_normalizes_to_first() {
        assert_eq!(shift_month(day(2024, 6, 15), -1), Some(day(2024, 5, 1)));
        assert_eq!(shift_month(day(2024, 6, 15), 1), Some(day(2024, 7, 1)));
    }

    #[test]
    fn shift_month_crosses_years() {
        assert_eq!(shift_month(day(2024, 1, 31), -1), Some(day(2023, 12, 1)));
        assert_eq!(shift_month(day(2024, 12, 31), 1), Some(day(2025, 1, 1)));
    }

    #[test]
    fn month_from_index_rolls_over() {
        assert_eq!(month_from_index(2024, 2), Some(day(2024, 3, 1)));
        assert_eq!(month_from_index(2024, 12), Some(day(2025, 1, 1)));
        assert_eq!(month_from_index(2024, -1), Some(day(2023, 12, 1)));
    }

    #[test]
    fn year_range_spans_sixty_one_years() {
        let years: Vec<i32> = year_range(2024).collect();
        assert_eq!(years.len(), 61);
        assert_eq!(years.first(), Some(&1969));
        assert_eq!(years.last(), Some(&2029));
    }

    #[test]
    fn format_date_placeholder() {
        assert_eq!(format_date(None), "Select date");
    }

    #[test]
    fn format_date_short_us_style() {
        assert_eq!(format_date(Some(day(2024, 1, 1))), "Jan 1, 2024");
        assert_eq!(format_date(Some(day(2023, 12, 25))), "Dec 25, 2023");
    }

    #[test]
    fn format_date_time_only_with_date() {
        assert_eq!(format_date_time(Some(day(2024, 1, 1)), "09:00"), "Jan 1, 2024 at 09:00");
        assert_eq!(format_date_time(None, "09:00"), "Select date");
    }
}
