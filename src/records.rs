//! Record building
//!
//! Flattens expanded chunks into the uniform per-observation record set:
//! one `LogEntry` per (chunk, observation) pair, preserving chunk order and
//! pair order. Pure, no I/O, total for well-formed input.

use crate::parse::ExpandedChunk;
use crate::types::{HabitMeta, LogEntry};

/// Build the flat record set for one habit file.
pub fn build_records(meta: &HabitMeta, chunks: &[ExpandedChunk]) -> Vec<LogEntry> {
    let mut entries = Vec::new();

    for chunk in chunks {
        for obs in &chunk.observations {
            entries.push(LogEntry {
                habit_name: meta.name.clone(),
                date: chunk.date,
                day_of_week: chunk.day_of_week,
                week_number: chunk.week_number,
                year: chunk.year,
                description: obs.description.clone(),
                metric_minutes: obs.minutes,
                goal: meta.goal.clone(),
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{chunk_log, expand_chunk};
    use crate::types::Weekday;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn expanded(raw: &[&str]) -> Vec<ExpandedChunk> {
        let body: Vec<String> = raw.iter().map(|l| l.to_string()).collect();
        chunk_log(&body)
            .iter()
            .map(|c| expand_chunk(c).unwrap())
            .collect()
    }

    #[test]
    fn test_build_records_preserves_order() {
        let meta = HabitMeta {
            name: "Read".to_string(),
            goal: "30min/day".to_string(),
        };
        let chunks = expanded(&[
            "- 2024-01-03",
            "    - Read",
            "    - 00:45",
            "- 2024-01-05",
            "    - Read fiction",
            "    - 00:20",
            "    - Read nonfiction",
            "    - 00:25",
        ]);

        let entries = build_records(&meta, &chunks);
        assert_eq!(entries.len(), 3);

        assert_eq!(
            entries[0],
            LogEntry {
                habit_name: "Read".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                day_of_week: Weekday::Wed,
                week_number: 0,
                year: 2024,
                description: "Read".to_string(),
                metric_minutes: 45,
                goal: "30min/day".to_string(),
            }
        );
        assert_eq!(entries[1].description, "Read fiction");
        assert_eq!(entries[2].description, "Read nonfiction");
        assert_eq!(entries[2].metric_minutes, 25);
    }

    #[test]
    fn test_chunk_without_observations_yields_no_records() {
        let meta = HabitMeta {
            name: "Read".to_string(),
            goal: "g".to_string(),
        };
        let chunks = expanded(&["- 2024-01-03"]);
        assert!(build_records(&meta, &chunks).is_empty());
    }
}
