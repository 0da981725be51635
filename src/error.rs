//! Error types for habitext

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while normalizing a habit log
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required metadata field: {0}")]
    MissingField(String),

    #[error("Malformed date chunk: {0}")]
    MalformedChunk(String),

    #[error("Date parse error: {0}")]
    DateParse(String),

    #[error("Time token is not hh:mm shaped: {0}")]
    TimeFormat(String),

    #[error("Calendar completion called on an empty series")]
    EmptySeries,

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl PipelineError {
    /// Pipeline stage the error originated from, for batch reporting.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::MissingField(_) => Stage::Metadata,
            PipelineError::MalformedChunk(_)
            | PipelineError::DateParse(_)
            | PipelineError::TimeFormat(_) => Stage::Expansion,
            PipelineError::EmptySeries | PipelineError::InvariantViolation(_) => Stage::Completion,
        }
    }
}

/// Pipeline stages a failure can originate from, in dependency order.
///
/// Chunking, record building, and daily aggregation are total over
/// well-formed input and never fail; a headerless chunk surfaces from the
/// expansion stage that rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Metadata,
    Expansion,
    Completion,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Metadata => "metadata",
            Stage::Expansion => "expansion",
            Stage::Completion => "completion",
        }
    }
}
