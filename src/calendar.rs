//! Calendar conventions
//!
//! The log format inherits two non-standard conventions from its display
//! layer, both made explicit here so they stay visible and testable:
//!
//! - Week numbering is Sunday-anchored and 0-indexed from January 1st
//!   (strftime `%U` semantics, not ISO 8601): days before the first Sunday
//!   of the year fall in week 0.
//! - Calendar completion starts from a fixed two-week lead-in: the Sunday
//!   on/before the first entry, minus another 7 days.

use chrono::{Datelike, Days, NaiveDate};

/// Sunday-anchored, 0-indexed week of year (strftime `%U`).
///
/// Days before the first Sunday of the year are week 0; the first Sunday
/// starts week 1.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let yday = date.ordinal0();
    let wday = date.weekday().num_days_from_sunday();
    (yday + 7 - wday) / 7
}

/// Most recent Sunday on or before the given date.
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date - Days::new(back)
}

/// Lead-in anchor for calendar completion: the Sunday on/before `first_date`
/// minus one more week, giving a full two-calendar-week run-up before the
/// data begins.
pub fn anchor_sunday(first_date: NaiveDate) -> NaiveDate {
    sunday_on_or_before(first_date) - Days::new(7)
}

/// All dates from `start` through `end` inclusive, ascending.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_of_year_matches_strftime_u() {
        // 2024-01-01 is a Monday: before the first Sunday, so week 0
        assert_eq!(week_of_year(date(2024, 1, 1)), 0);
        // 2024-01-07 is the first Sunday of 2024: week 1 begins
        assert_eq!(week_of_year(date(2024, 1, 7)), 1);
        assert_eq!(week_of_year(date(2024, 1, 6)), 0);
        // 2023-01-01 is itself a Sunday: week 1 from day one
        assert_eq!(week_of_year(date(2023, 1, 1)), 1);
        // Late December lands in the last week of the year
        assert_eq!(week_of_year(date(2023, 12, 24)), 52);
        assert_eq!(week_of_year(date(2023, 12, 31)), 53);
    }

    #[test]
    fn test_sunday_on_or_before() {
        // 2024-01-03 is a Wednesday
        assert_eq!(sunday_on_or_before(date(2024, 1, 3)), date(2023, 12, 31));
        // A Sunday rounds to itself
        assert_eq!(sunday_on_or_before(date(2024, 1, 7)), date(2024, 1, 7));
    }

    #[test]
    fn test_anchor_sunday_is_two_weeks_of_lead_in() {
        let anchor = anchor_sunday(date(2024, 1, 3));
        assert_eq!(anchor, date(2023, 12, 24));
        assert_eq!(anchor.weekday(), Weekday::Sun);
        // Anchoring a Sunday still backs off a full week
        assert_eq!(anchor_sunday(date(2024, 1, 7)), date(2023, 12, 31));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let dates: Vec<_> = date_range(date(2024, 1, 1), date(2024, 1, 3)).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
    }
}
