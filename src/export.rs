//! Report encoding
//!
//! Encodes normalized pipeline output into the tabular shapes downstream
//! visualization and PDF collaborators consume, plus a versioned JSON
//! payload stamped with producer provenance.
//!
//! Column contracts, reproduced exactly:
//! - Pre-aggregation rows: `Name, Date, Day, Week, Year, Description,
//!   Metric, Goal`
//! - Calendar-complete rows: `Name, Date, Day, Week, Year, Description,
//!   Metric`. The goal is not duplicated per row (it lives on the habit
//!   header), and the description is always empty since daily totals merge
//!   all descriptions for the date.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::{mean_by_weekday, sum_by_description, weekly_completion};
use crate::pipeline::{FileFailure, HabitReport};
use crate::types::{CompleteDayRecord, DescriptionTotal, LogEntry, WeekdayMean, WeeklyCompletion};
use crate::{HABITEXT_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "habitext.report.v1";

/// Pre-aggregation tabular row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Week")]
    pub week: u32,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Metric")]
    pub metric: u32,
    #[serde(rename = "Goal")]
    pub goal: String,
}

impl From<&LogEntry> for EntryRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            name: entry.habit_name.clone(),
            date: entry.date,
            day: entry.day_of_week.as_str().to_string(),
            week: entry.week_number,
            year: entry.year,
            description: entry.description.clone(),
            metric: entry.metric_minutes,
            goal: entry.goal.clone(),
        }
    }
}

/// Calendar-complete tabular row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Week")]
    pub week: u32,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Metric")]
    pub metric: u32,
}

impl From<&CompleteDayRecord> for CompleteRow {
    fn from(rec: &CompleteDayRecord) -> Self {
        Self {
            name: rec.habit_name.clone(),
            date: rec.date,
            day: rec.day_of_week.as_str().to_string(),
            week: rec.week_number,
            year: rec.year,
            description: String::new(),
            metric: rec.total_minutes,
        }
    }
}

/// Producer metadata stamped into every report payload
#[derive(Debug, Clone, Serialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Everything downstream needs to render one habit's pages
#[derive(Debug, Clone, Serialize)]
pub struct HabitSection {
    pub name: String,
    pub goal: String,
    pub entries: Vec<EntryRow>,
    pub complete: Vec<CompleteRow>,
    pub description_totals: Vec<DescriptionTotal>,
    pub weekday_means: Vec<WeekdayMean>,
    pub weekly_completion: Vec<WeeklyCompletion>,
}

/// Complete report payload for a batch run
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub report_version: String,
    pub producer: ReportProducer,
    pub generated_at_utc: String,
    pub habits: Vec<HabitSection>,
    pub failures: Vec<FileFailure>,
}

/// Report encoder producing versioned payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Build the section for one habit, secondary aggregations included.
    pub fn encode_habit(&self, report: &HabitReport) -> HabitSection {
        HabitSection {
            name: report.meta.name.clone(),
            goal: report.meta.goal.clone(),
            entries: report.entries.iter().map(EntryRow::from).collect(),
            complete: report.complete.iter().map(CompleteRow::from).collect(),
            description_totals: sum_by_description(&report.entries),
            weekday_means: mean_by_weekday(&report.daily),
            weekly_completion: weekly_completion(&report.complete),
        }
    }

    /// Assemble the full payload for a batch run.
    pub fn encode(&self, reports: &[HabitReport], failures: &[FileFailure]) -> ReportPayload {
        ReportPayload {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: HABITEXT_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at_utc: Utc::now().to_rfc3339(),
            habits: reports.iter().map(|r| self.encode_habit(r)).collect(),
            failures: failures.to_vec(),
        }
    }
}
