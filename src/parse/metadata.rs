//! Metadata extraction
//!
//! Pulls the declared `Name:` and `Goal:` fields out of the header block
//! preceding the `# Log` marker. The header is otherwise free form.

use crate::error::PipelineError;
use crate::types::HabitMeta;

/// Extract habit metadata from the header lines of a log file.
///
/// Returns the value following the `Name:` and `Goal:` labels, trimmed of
/// surrounding whitespace. Fails with `MissingField` if either label is
/// absent. The first occurrence of each label wins.
pub fn extract_metadata(metadata_lines: &[String]) -> Result<HabitMeta, PipelineError> {
    let name = field_value(metadata_lines, "Name:")?;
    let goal = field_value(metadata_lines, "Goal:")?;
    Ok(HabitMeta { name, goal })
}

fn field_value(lines: &[String], label: &str) -> Result<String, PipelineError> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(label))
        .map(|rest| rest.trim().to_string())
        .ok_or_else(|| PipelineError::MissingField(label.trim_end_matches(':').to_string()))
}
