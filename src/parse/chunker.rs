//! Date chunking
//!
//! Segments the log body into per-calendar-day chunks. A line is a date line
//! iff its first character is the bullet marker `-` at column 0 (observation
//! bullets are indented, so they never match). Every date line starts a new
//! chunk; all lines up to the next date line belong to the current chunk.
//!
//! The chunks cover the entire input with no gaps or overlaps: concatenating
//! them reproduces the body line for line. Leading lines before the first
//! date line (including a body with no date lines at all) form a headerless
//! chunk, which downstream expansion rejects with `MalformedChunk`.

/// One date chunk: a date-bullet header line followed by the observation
/// lines belonging to that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChunk {
    lines: Vec<String>,
}

impl DateChunk {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// All lines in the chunk, header included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The date-bullet header line.
    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// The observation lines after the header.
    pub fn body(&self) -> &[String] {
        &self.lines[1..]
    }
}

fn is_date_line(line: &str) -> bool {
    line.starts_with('-')
}

/// Segment the body lines of a log into date chunks.
///
/// An empty body yields no chunks.
pub fn chunk_log(body: &[String]) -> Vec<DateChunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in body {
        if is_date_line(line) && !current.is_empty() {
            chunks.push(DateChunk::new(std::mem::take(&mut current)));
        }
        current.push(line.clone());
    }

    if !current.is_empty() {
        chunks.push(DateChunk::new(current));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_chunking_splits_on_date_lines() {
        let body = lines(&[
            "- 2024-01-03",
            "    - Read",
            "    - 00:45",
            "- 2024-01-05",
            "    - Read fiction",
            "    - 00:20",
            "    - Read nonfiction",
            "    - 00:25",
        ]);
        let chunks = chunk_log(&body);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].header(), "- 2024-01-03");
        assert_eq!(chunks[0].body().len(), 2);
        assert_eq!(chunks[1].header(), "- 2024-01-05");
        assert_eq!(chunks[1].body().len(), 4);
    }

    #[test]
    fn test_round_trip_chunking() {
        let body = lines(&[
            "- 2024-01-03",
            "    - Read",
            "    - 00:45",
            "- 2024-01-04",
            "- 2024-01-05",
            "    - Read",
            "    - 01:00",
        ]);
        let chunks = chunk_log(&body);
        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.lines().iter().cloned())
            .collect();
        assert_eq!(rejoined, body);
    }

    #[test]
    fn test_zero_date_lines_yields_single_chunk() {
        let body = lines(&["    - stray observation", "    - 00:10"]);
        let chunks = chunk_log(&body);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].lines(), &body[..]);
    }

    #[test]
    fn test_empty_body_yields_no_chunks() {
        assert!(chunk_log(&[]).is_empty());
    }

    #[test]
    fn test_date_only_chunk_has_empty_body() {
        let chunks = chunk_log(&lines(&["- 2024-01-03"]));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].body().is_empty());
    }
}
