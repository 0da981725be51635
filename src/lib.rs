//! Habitext - habit-log parsing and calendar normalization engine
//!
//! Habitext turns free-form, bullet-structured markdown habit logs into a
//! strictly validated, date-complete daily time series per habit through a
//! deterministic pipeline: metadata extraction → date chunking → chunk
//! expansion → record building → daily aggregation → calendar completion.
//!
//! The output structures are what the plot and PDF layers consume; rendering
//! itself lives outside this crate.

pub mod aggregate;
pub mod calendar;
pub mod complete;
pub mod error;
pub mod export;
pub mod parse;
pub mod pipeline;
pub mod records;
pub mod types;

pub use error::{PipelineError, Stage};
pub use pipeline::{process_batch, process_log, BatchOutcome, FileFailure, HabitReport};
pub use types::{
    AggregatedDayRecord, CompleteDayRecord, HabitMeta, LogEntry, Weekday, HEATMAP_ROW_ORDER,
};

/// Habitext version embedded in all report payloads
pub const HABITEXT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "habitext";
