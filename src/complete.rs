//! Calendar completion
//!
//! Turns a per-habit sequence of aggregated daily records into a contiguous
//! daily series: every calendar date from the lead-in anchor through the
//! last real entry appears exactly once, missing dates synthesized as zero
//! records. The lead-in is a fixed two calendar weeks before the data
//! begins, so a heatmap always has full leading columns.
//!
//! Pure transformation: the input is never mutated, a fresh record sequence
//! is returned.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{anchor_sunday, date_range, week_of_year};
use crate::error::PipelineError;
use crate::types::{AggregatedDayRecord, CompleteDayRecord, Weekday};

/// Complete the calendar for one habit's aggregated daily records.
///
/// Preconditions: the input is non-empty (`EmptySeries` otherwise) and
/// belongs to exactly one habit (`InvariantViolation` otherwise). The
/// upstream pipeline always partitions by habit before this stage.
///
/// The output is sorted ascending by date and covers
/// `[anchor_sunday(first_date), last_date]` with no gaps and no duplicates.
pub fn complete_calendar(
    records: &[AggregatedDayRecord],
) -> Result<Vec<CompleteDayRecord>, PipelineError> {
    let first = records.first().ok_or(PipelineError::EmptySeries)?;
    let habit_name = &first.habit_name;

    if let Some(other) = records.iter().find(|r| &r.habit_name != habit_name) {
        return Err(PipelineError::InvariantViolation(format!(
            "calendar completion expects a single habit, got {:?} and {:?}",
            habit_name, other.habit_name
        )));
    }

    let mut by_date: BTreeMap<NaiveDate, &AggregatedDayRecord> = BTreeMap::new();
    for rec in records {
        by_date.insert(rec.date, rec);
    }

    // BTreeMap keys are sorted, so min/max are the range bounds
    let first_date = *by_date.keys().next().ok_or(PipelineError::EmptySeries)?;
    let last_date = *by_date.keys().next_back().ok_or(PipelineError::EmptySeries)?;
    let anchor = anchor_sunday(first_date);

    let complete = date_range(anchor, last_date)
        .map(|date| match by_date.get(&date) {
            Some(rec) => CompleteDayRecord {
                habit_name: rec.habit_name.clone(),
                date: rec.date,
                day_of_week: rec.day_of_week,
                week_number: rec.week_number,
                year: rec.year,
                total_minutes: rec.total_minutes,
                is_real_entry: true,
            },
            None => synthesize_zero(habit_name, date),
        })
        .collect();

    Ok(complete)
}

fn synthesize_zero(habit_name: &str, date: NaiveDate) -> CompleteDayRecord {
    CompleteDayRecord {
        habit_name: habit_name.to_string(),
        date,
        day_of_week: Weekday::from_date(date),
        week_number: week_of_year(date),
        year: date.year(),
        total_minutes: 0,
        is_real_entry: false,
    }
}
