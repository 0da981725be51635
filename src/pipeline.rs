//! Pipeline orchestration
//!
//! This module provides the public API for habitext. It runs one log's text
//! through the full pipeline (metadata → chunking → expansion → record
//! build → aggregation → calendar completion) and offers a batch entry
//! point that isolates failures per input: one malformed log never blocks
//! reporting for the other habits.
//!
//! The pipeline works on in-memory text only; reading files from disk
//! belongs to the caller (the CLI binary, for one).

use serde::Serialize;

use crate::aggregate::aggregate_daily;
use crate::complete::complete_calendar;
use crate::error::{PipelineError, Stage};
use crate::parse::{chunk_log, expand_chunk, extract_metadata, split_sections, ExpandedChunk};
use crate::records::build_records;
use crate::types::{AggregatedDayRecord, CompleteDayRecord, HabitMeta, LogEntry};

/// Fully normalized output for one habit log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitReport {
    /// Declared habit metadata; the goal survives here even though the
    /// aggregated rows do not carry it
    pub meta: HabitMeta,
    /// Pre-aggregation observations, one per bullet pair
    pub entries: Vec<LogEntry>,
    /// One row per calendar date with source data
    pub daily: Vec<AggregatedDayRecord>,
    /// Calendar-complete daily series, lead-in included
    pub complete: Vec<CompleteDayRecord>,
}

/// Run one log's text through the full pipeline.
///
/// Returns `Ok(None)` for a log whose body has no entries to process (the
/// file is skipped, not failed). Any malformed content is fatal for this
/// log and propagates as a typed error.
pub fn process_log(text: &str) -> Result<Option<HabitReport>, PipelineError> {
    let (metadata_lines, body_lines) = split_sections(text)?;
    let meta = extract_metadata(&metadata_lines)?;

    if body_lines.is_empty() {
        return Ok(None);
    }

    let chunks = chunk_log(&body_lines);
    let expanded: Vec<ExpandedChunk> = chunks
        .iter()
        .map(expand_chunk)
        .collect::<Result<_, _>>()?;

    let entries = build_records(&meta, &expanded);
    if entries.is_empty() {
        // Date lines with no observations leave nothing to aggregate
        return Ok(None);
    }

    let daily = aggregate_daily(&entries);
    let complete = complete_calendar(&daily)?;

    Ok(Some(HabitReport {
        meta,
        entries,
        daily,
        complete,
    }))
}

/// One failed input in a batch, with enough context to locate the problem
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Label of the input, typically its file path
    pub file: String,
    /// Pipeline stage the failure occurred in
    pub stage: Stage,
    /// Error message, including the offending line content where known
    pub error: String,
}

/// Outcome of processing a batch of habit logs
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully processed logs, in input order
    pub reports: Vec<(String, HabitReport)>,
    /// Inputs skipped because their log body was empty
    pub skipped: Vec<String>,
    /// Inputs that failed, with stage and context
    pub failures: Vec<FileFailure>,
}

/// Process a batch of (label, log text) inputs, isolating failures per input.
pub fn process_batch<'a, I>(inputs: I) -> BatchOutcome
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut outcome = BatchOutcome::default();

    for (label, text) in inputs {
        match process_log(text) {
            Ok(Some(report)) => outcome.reports.push((label.to_string(), report)),
            Ok(None) => outcome.skipped.push(label.to_string()),
            Err(err) => outcome.failures.push(FileFailure {
                file: label.to_string(),
                stage: err.stage(),
                error: err.to_string(),
            }),
        }
    }

    outcome
}
