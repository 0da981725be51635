//! Daily aggregation
//!
//! Collapses per-observation records into per-day totals, plus the secondary
//! aggregations consumed by the bar-chart and line-chart producers:
//! per-description totals, zero-filtered weekday means, and weekly
//! completion counts.

use std::collections::BTreeMap;

use crate::calendar::sunday_on_or_before;
use crate::types::{
    AggregatedDayRecord, CompleteDayRecord, DescriptionTotal, LogEntry, WeekdayMean,
    WeeklyCompletion, CHART_DAY_ORDER,
};

/// Collapse duplicate-date entries into one total per (habit, calendar date).
///
/// The grouping key deliberately excludes the description: multiple
/// differently-described observations on the same day merge into one daily
/// total. Output is sorted by habit name, then date.
pub fn aggregate_daily(entries: &[LogEntry]) -> Vec<AggregatedDayRecord> {
    let mut by_day: BTreeMap<(String, chrono::NaiveDate), AggregatedDayRecord> = BTreeMap::new();

    for entry in entries {
        by_day
            .entry((entry.habit_name.clone(), entry.date))
            .and_modify(|rec| rec.total_minutes += entry.metric_minutes)
            .or_insert_with(|| AggregatedDayRecord {
                habit_name: entry.habit_name.clone(),
                date: entry.date,
                day_of_week: entry.day_of_week,
                week_number: entry.week_number,
                year: entry.year,
                total_minutes: entry.metric_minutes,
            });
    }

    by_day.into_values().collect()
}

/// Drop records whose daily total is zero.
///
/// Applied only by the bar-chart producers below, never by the
/// heatmap/completion path.
pub fn filter_zero(records: &[AggregatedDayRecord]) -> Vec<AggregatedDayRecord> {
    records
        .iter()
        .filter(|r| r.total_minutes != 0)
        .cloned()
        .collect()
}

/// Mean daily minutes per weekday, over days with a nonzero total.
///
/// Output follows the Sunday-first chart order; weekdays with no qualifying
/// days are omitted.
pub fn mean_by_weekday(records: &[AggregatedDayRecord]) -> Vec<WeekdayMean> {
    let nonzero = filter_zero(records);

    let mut sums: BTreeMap<usize, (u64, u64)> = BTreeMap::new();
    for rec in &nonzero {
        let rank = CHART_DAY_ORDER
            .iter()
            .position(|d| *d == rec.day_of_week)
            .unwrap_or(0);
        let (sum, count) = sums.entry(rank).or_insert((0, 0));
        *sum += u64::from(rec.total_minutes);
        *count += 1;
    }

    sums.into_iter()
        .map(|(rank, (sum, count))| WeekdayMean {
            day_of_week: CHART_DAY_ORDER[rank],
            mean_minutes: sum as f64 / count as f64,
        })
        .collect()
}

/// Total minutes per description across the whole record set.
///
/// Sorted ascending by total (the horizontal bar chart's display order),
/// ties broken by description.
pub fn sum_by_description(entries: &[LogEntry]) -> Vec<DescriptionTotal> {
    let mut sums: BTreeMap<String, u32> = BTreeMap::new();
    for entry in entries {
        *sums.entry(entry.description.clone()).or_insert(0) += entry.metric_minutes;
    }

    let mut totals: Vec<DescriptionTotal> = sums
        .into_iter()
        .map(|(description, total_minutes)| DescriptionTotal {
            description,
            total_minutes,
        })
        .collect();
    totals.sort_by(|a, b| {
        a.total_minutes
            .cmp(&b.total_minutes)
            .then_with(|| a.description.cmp(&b.description))
    });
    totals
}

/// Days completed per Sunday-anchored week, over a calendar-complete series.
///
/// The metric is clipped to 0/1 per day, then summed per week labeled by its
/// starting Sunday. On a calendar-complete input every week in the range
/// appears, leading zero weeks included.
pub fn weekly_completion(records: &[CompleteDayRecord]) -> Vec<WeeklyCompletion> {
    let mut weeks: BTreeMap<chrono::NaiveDate, u32> = BTreeMap::new();

    for rec in records {
        let week_start = sunday_on_or_before(rec.date);
        let completed = weeks.entry(week_start).or_insert(0);
        if rec.total_minutes > 0 {
            *completed += 1;
        }
    }

    weeks
        .into_iter()
        .map(|(week_start, completed_days)| WeeklyCompletion {
            week_start,
            completed_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weekday;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(name: &str, d: NaiveDate, description: &str, minutes: u32) -> LogEntry {
        LogEntry {
            habit_name: name.to_string(),
            date: d,
            day_of_week: Weekday::from_date(d),
            week_number: crate::calendar::week_of_year(d),
            year: 2024,
            description: description.to_string(),
            metric_minutes: minutes,
            goal: "30min/day".to_string(),
        }
    }

    #[test]
    fn test_aggregate_merges_same_day_descriptions() {
        let entries = vec![
            entry("Read", date(2024, 1, 3), "Read", 45),
            entry("Read", date(2024, 1, 5), "Read fiction", 20),
            entry("Read", date(2024, 1, 5), "Read nonfiction", 25),
        ];
        let daily = aggregate_daily(&entries);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, date(2024, 1, 3));
        assert_eq!(daily[0].total_minutes, 45);
        assert_eq!(daily[1].date, date(2024, 1, 5));
        assert_eq!(daily[1].total_minutes, 45);
    }

    #[test]
    fn test_aggregate_keeps_habits_separate() {
        let entries = vec![
            entry("Read", date(2024, 1, 3), "a", 10),
            entry("Write", date(2024, 1, 3), "b", 20),
        ];
        let daily = aggregate_daily(&entries);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].habit_name, "Read");
        assert_eq!(daily[1].habit_name, "Write");
    }

    #[test]
    fn test_aggregation_idempotence() {
        let entries = vec![
            entry("Read", date(2024, 1, 3), "a", 45),
            entry("Read", date(2024, 1, 5), "b", 20),
            entry("Read", date(2024, 1, 5), "c", 25),
        ];
        let daily = aggregate_daily(&entries);

        // Re-aggregating a one-row-per-date series is a no-op
        let as_entries: Vec<LogEntry> = daily
            .iter()
            .map(|r| entry(&r.habit_name, r.date, "", r.total_minutes))
            .collect();
        assert_eq!(aggregate_daily(&as_entries), daily);
    }

    #[test]
    fn test_filter_zero() {
        let daily = vec![
            AggregatedDayRecord {
                habit_name: "Read".to_string(),
                date: date(2024, 1, 3),
                day_of_week: Weekday::Wed,
                week_number: 0,
                year: 2024,
                total_minutes: 0,
            },
            AggregatedDayRecord {
                habit_name: "Read".to_string(),
                date: date(2024, 1, 4),
                day_of_week: Weekday::Thu,
                week_number: 0,
                year: 2024,
                total_minutes: 30,
            },
        ];
        let nonzero = filter_zero(&daily);
        assert_eq!(nonzero.len(), 1);
        assert_eq!(nonzero[0].date, date(2024, 1, 4));
    }

    #[test]
    fn test_mean_by_weekday_excludes_zero_days() {
        // Two Wednesdays (45 and 15) plus a zero Wednesday that must not count
        let entries = vec![
            entry("Read", date(2024, 1, 3), "a", 45),
            entry("Read", date(2024, 1, 10), "a", 15),
            entry("Read", date(2024, 1, 17), "a", 0),
            entry("Read", date(2024, 1, 7), "a", 10),
        ];
        let means = mean_by_weekday(&aggregate_daily(&entries));
        assert_eq!(means.len(), 2);
        // Sunday first in chart order
        assert_eq!(means[0].day_of_week, Weekday::Sun);
        assert_eq!(means[0].mean_minutes, 10.0);
        assert_eq!(means[1].day_of_week, Weekday::Wed);
        assert_eq!(means[1].mean_minutes, 30.0);
    }

    #[test]
    fn test_sum_by_description_sorted_ascending() {
        let entries = vec![
            entry("Read", date(2024, 1, 3), "fiction", 40),
            entry("Read", date(2024, 1, 4), "nonfiction", 10),
            entry("Read", date(2024, 1, 5), "fiction", 20),
        ];
        let totals = sum_by_description(&entries);
        assert_eq!(
            totals,
            vec![
                DescriptionTotal {
                    description: "nonfiction".to_string(),
                    total_minutes: 10,
                },
                DescriptionTotal {
                    description: "fiction".to_string(),
                    total_minutes: 60,
                },
            ]
        );
    }

    #[test]
    fn test_weekly_completion_counts_nonzero_days() {
        let mk = |d: NaiveDate, minutes: u32| CompleteDayRecord {
            habit_name: "Read".to_string(),
            date: d,
            day_of_week: Weekday::from_date(d),
            week_number: crate::calendar::week_of_year(d),
            year: 2024,
            total_minutes: minutes,
            is_real_entry: minutes > 0,
        };

        // 2024-01-07 is a Sunday; cover that week plus two days of the next
        let mut records = Vec::new();
        for (offset, minutes) in [(0, 30), (1, 0), (2, 15), (3, 0), (4, 0), (5, 20), (6, 0)] {
            records.push(mk(date(2024, 1, 7 + offset), minutes));
        }
        records.push(mk(date(2024, 1, 14), 5));
        records.push(mk(date(2024, 1, 15), 0));

        let weekly = weekly_completion(&records);
        assert_eq!(
            weekly,
            vec![
                WeeklyCompletion {
                    week_start: date(2024, 1, 7),
                    completed_days: 3,
                },
                WeeklyCompletion {
                    week_start: date(2024, 1, 14),
                    completed_days: 1,
                },
            ]
        );
    }
}
