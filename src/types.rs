//! Core types for the habitext pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: parsed metadata, per-observation log entries, aggregated daily
//! records, and calendar-complete daily records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day of week with three-letter labels matching the log's display conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

/// Vertical-axis ordering used by the heatmap, top to bottom.
///
/// A presentation contract: downstream renderers rely on this exact order to
/// place Saturday at the top row and Sunday at the bottom.
pub const HEATMAP_ROW_ORDER: [Weekday; 7] = [
    Weekday::Sat,
    Weekday::Fri,
    Weekday::Thu,
    Weekday::Wed,
    Weekday::Tue,
    Weekday::Mon,
    Weekday::Sun,
];

/// Natural chart ordering for weekday bar charts, Sunday first.
pub const CHART_DAY_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }

    /// Day of week for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Sun => Weekday::Sun,
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
        }
    }

    /// Position in [`HEATMAP_ROW_ORDER`]: Sat is 0, Sun is 6.
    pub fn display_rank(&self) -> usize {
        HEATMAP_ROW_ORDER
            .iter()
            .position(|d| d == self)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Habit metadata declared in the header block of a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitMeta {
    /// Habit name (`Name:` label)
    pub name: String,
    /// Goal text (`Goal:` label), free form
    pub goal: String,
}

/// One bullet observation from a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Habit the observation belongs to
    pub habit_name: String,
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Day of week derived from the date
    pub day_of_week: Weekday,
    /// Sunday-anchored, 0-indexed week of year (strftime `%U` convention)
    pub week_number: u32,
    /// Calendar year
    pub year: i32,
    /// Free-form description text
    pub description: String,
    /// Minutes spent, converted from an `hh:mm` token
    pub metric_minutes: u32,
    /// Goal text carried from the habit metadata
    pub goal: String,
}

/// One row per (habit, calendar date) with the day's summed minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedDayRecord {
    pub habit_name: String,
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub week_number: u32,
    pub year: i32,
    /// Sum of `metric_minutes` over all observations on this date
    pub total_minutes: u32,
}

/// Calendar-complete daily record: one per date in a contiguous range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteDayRecord {
    pub habit_name: String,
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub week_number: u32,
    pub year: i32,
    pub total_minutes: u32,
    /// True if the date had source data, false if synthesized as a zero fill
    pub is_real_entry: bool,
}

/// Total minutes for one description across the whole log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTotal {
    pub description: String,
    pub total_minutes: u32,
}

/// Mean daily minutes for one weekday, over days with a nonzero total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayMean {
    pub day_of_week: Weekday,
    pub mean_minutes: f64,
}

/// Number of days completed (nonzero metric) in one Sunday-anchored week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCompletion {
    /// Sunday the week starts on
    pub week_start: NaiveDate,
    /// Count of days in the week with a nonzero total
    pub completed_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_from_date() {
        // 2024-01-07 is a Sunday
        let d = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(Weekday::from_date(d), Weekday::Sun);
        assert_eq!(Weekday::from_date(d.succ_opt().unwrap()), Weekday::Mon);
    }

    #[test]
    fn test_display_rank_matches_heatmap_order() {
        assert_eq!(Weekday::Sat.display_rank(), 0);
        assert_eq!(Weekday::Wed.display_rank(), 3);
        assert_eq!(Weekday::Sun.display_rank(), 6);
    }

    #[test]
    fn test_weekday_serializes_as_three_letter_label() {
        assert_eq!(serde_json::to_string(&Weekday::Tue).unwrap(), "\"Tue\"");
    }
}
