//! Log file parsing
//!
//! This module turns the raw text of one habit log into typed structures
//! through three stages:
//!
//! 1. Section split: metadata header vs. log body at the `# Log` marker
//! 2. Chunking: the body segmented into per-calendar-day chunks
//! 3. Expansion: each chunk tokenized into calendar attributes plus
//!    (description, minutes) observations
//!
//! Parsing is positional by design (the input format is a bullet/indentation
//! convention, not a grammar with delimiters), but each stage uses explicit
//! states and typed errors rather than silent index slicing.

pub mod chunker;
pub mod expander;
pub mod metadata;

pub use chunker::{chunk_log, DateChunk};
pub use expander::{expand_chunk, ExpandedChunk, Observation};
pub use metadata::extract_metadata;

use crate::error::PipelineError;

/// Exact section marker separating metadata from the log body.
pub const LOG_MARKER: &str = "# Log";

/// Split a log file into its metadata lines and its non-empty body lines.
///
/// Lines before the `# Log` marker are metadata; non-empty lines after it are
/// the body (blank lines in the body are ignored by contract). Trailing
/// whitespace is stripped, indentation is preserved.
pub fn split_sections(text: &str) -> Result<(Vec<String>, Vec<String>), PipelineError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();

    let marker_pos = lines
        .iter()
        .position(|l| *l == LOG_MARKER)
        .ok_or_else(|| PipelineError::MissingField(format!("section marker '{LOG_MARKER}'")))?;

    let metadata = lines[..marker_pos].iter().map(|l| l.to_string()).collect();
    let body = lines[marker_pos + 1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect();

    Ok((metadata, body))
}
