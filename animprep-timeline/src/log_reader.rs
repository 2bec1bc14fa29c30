//! Frame-index log parsing

use crate::{Error, Result};

/// Extracts the frame index from one log line.
///
/// Returns `Ok(None)` for blank lines. `line_number` is 1-based and only used
/// for error reporting.
pub fn parse_frame_index(line: &str, line_number: usize) -> Result<Option<i64>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    // `rsplit` always yields at least one field
    let field = line.rsplit(':').next().unwrap_or(line).trim();
    field
        .parse::<i64>()
        .map(Some)
        .map_err(|_| Error::Parse {
            line: line_number,
            content: line.to_string(),
        })
}
