//! Compressed playback timeline

use crate::Result;
use std::io::Write;

/// Name of the constant the timeline literal is assigned to
pub const TIMELINE_CONST: &str = "timeline";

/// A run of consecutive identical frame indices
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Frame index shown during this segment
    pub frame: i64,
    /// Number of consecutive log lines that carried this frame index
    #[cfg_attr(feature = "serde", serde(skip))]
    pub run_length: u64,
    /// Display time in seconds
    pub duration: f64,
}

impl Segment {
    /// Creates a segment, deriving its duration from the frame rate
    pub fn new(frame: i64, run_length: u64, frame_rate: u32) -> Self {
        Self {
            frame,
            run_length,
            duration: run_length as f64 / f64::from(frame_rate),
        }
    }
}

/// Ordered sequence of segments at a fixed frame rate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    /// Frames per second used to turn run lengths into durations
    pub frame_rate: u32,
    /// Segments in encounter order
    pub segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate,
            segments: Vec::new(),
        }
    }

    /// Appends a run of `run_length` lines showing `frame`
    pub fn push_run(&mut self, frame: i64, run_length: u64) {
        self.segments
            .push(Segment::new(frame, run_length, self.frame_rate));
    }

    /// Number of compressed segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total playback time in seconds
    pub fn total_duration(&self) -> f64 {
        let frames: u64 = self.segments.iter().map(|s| s.run_length).sum();
        frames as f64 / f64::from(self.frame_rate)
    }

    /// Writes the timeline as a JavaScript array literal assigned to a constant.
    ///
    /// Durations are rendered with six decimals so repeated runs produce
    /// byte-identical output.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "const {} = [", TIMELINE_CONST)?;
        for segment in &self.segments {
            writeln!(
                writer,
                "  {{ frame: {}, duration: {:.6} }},",
                segment.frame, segment.duration
            )?;
        }
        writeln!(writer, "];")?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes the timeline as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
