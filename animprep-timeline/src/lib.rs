//! animprep Timeline Compressor
//!
//! Collapses a frame-index log (one record per line, frame index in the last
//! colon-separated field) into run-length segments and writes them as a
//! JavaScript array literal.

pub mod compressor;
pub mod log_reader;

pub use compressor::{compress_lines, compress_reader, write_timeline, RunLengthEncoder};
pub use log_reader::parse_frame_index;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Log file the frame indices are read from
pub const INPUT_FILE: &str = "input.txt";

/// Destination of the timeline literal
pub const OUTPUT_FILE: &str = "output.txt";

/// Playback frames per second
pub const FRAME_RATE: u32 = 30;

/// Result type for animprep-timeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for animprep-timeline operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("animprep core error: {0}")]
    Core(#[from] animprep_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: expected an integer frame index in the last field of {content:?}")]
    Parse { line: usize, content: String },
}

/// Timeline compressor configuration
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Frame-index log
    pub input: PathBuf,
    /// Output path, overwritten if it exists
    pub output: PathBuf,
    /// Frames per second used to turn run lengths into durations
    pub frame_rate: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_FILE),
            output: PathBuf::from(OUTPUT_FILE),
            frame_rate: FRAME_RATE,
        }
    }
}

/// Outcome of a successful timeline run
#[derive(Debug, Clone)]
pub struct TimelineSummary {
    /// Number of compressed segments written
    pub segment_count: usize,
    /// Total playback time in seconds
    pub total_duration: f64,
    /// Path the timeline was written to
    pub output: PathBuf,
}

/// Compresses `config.input` and writes the timeline to `config.output`.
///
/// The whole log is parsed before the output file is touched.
#[tracing::instrument(skip_all, fields(input = %config.input.display()))]
pub fn run(config: &TimelineConfig) -> Result<TimelineSummary> {
    let file = File::open(&config.input)?;
    let timeline = compress_reader(BufReader::new(file), config.frame_rate)?;
    write_timeline(&timeline, &config.output)?;

    tracing::info!(
        segments = timeline.len(),
        output = %config.output.display(),
        "timeline written"
    );

    Ok(TimelineSummary {
        segment_count: timeline.len(),
        total_duration: timeline.total_duration(),
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> TimelineConfig {
        TimelineConfig {
            input: dir.join("input.txt"),
            output: dir.join("output.txt"),
            frame_rate: FRAME_RATE,
        }
    }

    #[test]
    fn test_default_config() {
        let config = TimelineConfig::default();
        assert_eq!(config.input, PathBuf::from("input.txt"));
        assert_eq!(config.output, PathBuf::from("output.txt"));
        assert_eq!(config.frame_rate, 30);
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.input, "x:1\nx:1\n\nx:2\nx:2\nx:2\n").unwrap();

        let summary = run(&config).unwrap();
        assert_eq!(summary.segment_count, 2);
        assert!((summary.total_duration - 5.0 / 30.0).abs() < 1e-12);

        assert_eq!(
            fs::read_to_string(&config.output).unwrap(),
            "const timeline = [\n  { frame: 1, duration: 0.066667 },\n  { frame: 2, duration: 0.100000 },\n];\n"
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.input, "t=0:video:3\nt=1:video:3\nt=2:video:4\n").unwrap();

        run(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_parse_error_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.input, "a:1\na:oops\n").unwrap();
        fs::write(&config.output, "previous").unwrap();

        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert_eq!(fs::read_to_string(&config.output).unwrap(), "previous");
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        assert!(matches!(run(&config), Err(Error::Io(_))));
        assert!(!config.output.exists());
    }
}
