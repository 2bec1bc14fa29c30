//! Run-length compression of frame indices into timeline segments

use crate::log_reader::parse_frame_index;
use crate::Result;
use animprep_core::Timeline;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

/// Single-pass run-length encoder.
///
/// Consecutive identical frame indices collapse into one segment; the pending
/// run is only recorded by [`RunLengthEncoder::finish`].
#[derive(Debug)]
pub struct RunLengthEncoder {
    timeline: Timeline,
    previous: Option<i64>,
    run_count: u64,
}

impl RunLengthEncoder {
    /// Creates an encoder producing segments at `frame_rate`
    pub fn new(frame_rate: u32) -> Self {
        Self {
            timeline: Timeline::new(frame_rate),
            previous: None,
            run_count: 0,
        }
    }

    /// Feeds the next frame index
    pub fn push(&mut self, frame: i64) {
        if self.previous == Some(frame) {
            self.run_count += 1;
            return;
        }

        self.flush();
        self.previous = Some(frame);
        self.run_count = 1;
    }

    /// Flushes the pending run and returns the timeline
    pub fn finish(mut self) -> Timeline {
        self.flush();
        self.timeline
    }

    fn flush(&mut self) {
        if let Some(frame) = self.previous {
            tracing::debug!(frame, run = self.run_count, "segment");
            self.timeline.push_run(frame, self.run_count);
        }
    }
}

/// Compresses an in-memory sequence of log lines.
///
/// Blank lines are skipped; any other line whose last field is not an integer
/// aborts the whole pass.
pub fn compress_lines<I, S>(lines: I, frame_rate: u32) -> Result<Timeline>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    compress(lines.into_iter().map(Ok), frame_rate)
}

/// Compresses a log read line by line from `reader`
pub fn compress_reader<R: BufRead>(reader: R, frame_rate: u32) -> Result<Timeline> {
    compress(reader.lines(), frame_rate)
}

fn compress<I, S>(lines: I, frame_rate: u32) -> Result<Timeline>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut encoder = RunLengthEncoder::new(frame_rate);
    for (i, line) in lines.enumerate() {
        if let Some(frame) = parse_frame_index(line?.as_ref(), i + 1)? {
            encoder.push(frame);
        }
    }
    Ok(encoder.finish())
}

/// Writes the timeline literal to `path`, replacing any existing file
pub fn write_timeline(timeline: &Timeline, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    timeline.write(&mut buffer)?;
    fs::write(path, buffer)?;
    Ok(())
}
