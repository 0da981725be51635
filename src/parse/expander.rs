//! Chunk expansion
//!
//! Tokenizes one date chunk into calendar attributes plus a list of
//! (description, minutes) observations. The expander is a small state
//! machine with three named states:
//!
//! - `ExpectDate`: the first line must be a date bullet at column 0
//! - `ExpectDescription`: an indented description bullet
//! - `ExpectTime`: an indented `hh:mm` time bullet, paired with the
//!   preceding description
//!
//! A chunk ending while a time line is still expected is malformed (the
//! description/time lines always come in pairs); it is rejected rather than
//! silently truncated.

use chrono::{Datelike, NaiveDate};

use crate::calendar::week_of_year;
use crate::error::PipelineError;
use crate::types::Weekday;

use super::chunker::DateChunk;

/// Date formats accepted for the date bullet, tried in order.
///
/// The format is locale independent: only unambiguous renderings are
/// accepted, ISO first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// One (description, minutes) observation from a date chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub description: String,
    pub minutes: u32,
}

/// A date chunk expanded into typed calendar attributes and observations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedChunk {
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub week_number: u32,
    pub year: i32,
    pub observations: Vec<Observation>,
}

/// Tokenizer states, named after the line each one expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectDate,
    ExpectDescription,
    ExpectTime,
}

/// Expand one date chunk.
///
/// The header is parsed as a calendar date; the remaining lines are paired
/// two at a time into (description, minutes) observations. Produces exactly
/// `(line_count - 1) / 2` observations or fails; no line is ever dropped.
pub fn expand_chunk(chunk: &DateChunk) -> Result<ExpandedChunk, PipelineError> {
    let mut state = State::ExpectDate;
    let mut date: Option<NaiveDate> = None;
    let mut observations = Vec::new();
    let mut pending_description: Option<String> = None;

    for line in chunk.lines() {
        match state {
            State::ExpectDate => {
                let token = date_bullet_text(line)?;
                date = Some(parse_date(token)?);
                state = State::ExpectDescription;
            }
            State::ExpectDescription => {
                pending_description = Some(observation_bullet_text(line)?.to_string());
                state = State::ExpectTime;
            }
            State::ExpectTime => {
                let token = observation_bullet_text(line)?;
                let minutes = parse_hhmm(token)?;
                observations.push(Observation {
                    // Set in ExpectDescription, one transition earlier
                    description: pending_description.take().unwrap_or_default(),
                    minutes,
                });
                state = State::ExpectDescription;
            }
        }
    }

    if state == State::ExpectTime {
        return Err(PipelineError::MalformedChunk(format!(
            "description bullet without a paired time bullet: {:?}",
            pending_description.unwrap_or_default()
        )));
    }

    let date = date.ok_or_else(|| {
        PipelineError::MalformedChunk("chunk is empty, no date token exists".to_string())
    })?;

    Ok(ExpandedChunk {
        date,
        day_of_week: Weekday::from_date(date),
        week_number: week_of_year(date),
        year: date.year(),
        observations,
    })
}

/// Text after the bullet marker of a column-0 date line.
fn date_bullet_text(line: &str) -> Result<&str, PipelineError> {
    line.strip_prefix("- ").map(str::trim).ok_or_else(|| {
        PipelineError::MalformedChunk(format!("expected a date bullet, found: {line:?}"))
    })
}

/// Text after the bullet marker of an indented observation line.
fn observation_bullet_text(line: &str) -> Result<&str, PipelineError> {
    line.trim_start()
        .strip_prefix("- ")
        .map(str::trim)
        .ok_or_else(|| {
            PipelineError::MalformedChunk(format!("expected an observation bullet, found: {line:?}"))
        })
}

fn parse_date(token: &str) -> Result<NaiveDate, PipelineError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .ok_or_else(|| PipelineError::DateParse(token.to_string()))
}

/// Convert an `hh:mm` token to total minutes.
///
/// Only the `digits:digits` shape is enforced; no range check is applied, so
/// `27:99` is accepted as 1719 minutes. A deliberate lenience carried over
/// from the accepted-input contract. A total past `u32::MAX` minutes is the
/// one exception: it cannot be represented and is rejected as malformed.
pub fn parse_hhmm(token: &str) -> Result<u32, PipelineError> {
    let (h, m) = token
        .split_once(':')
        .ok_or_else(|| PipelineError::TimeFormat(token.to_string()))?;

    let parse_part = |s: &str| -> Result<u32, PipelineError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PipelineError::TimeFormat(token.to_string()));
        }
        s.parse::<u32>()
            .map_err(|_| PipelineError::TimeFormat(token.to_string()))
    };

    // Widen before the multiply: u32 parts cannot overflow a u64 total
    let total = u64::from(parse_part(h)?) * 60 + u64::from(parse_part(m)?);
    u32::try_from(total).map_err(|_| PipelineError::TimeFormat(token.to_string()))
}
