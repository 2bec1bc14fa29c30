//! animprep Core Library
//!
//! This library provides the core data structures shared by the animprep tools:
//! an owned SVG node tree, the combined sprite document, and the run-length
//! compressed playback timeline.

pub mod sprite;
pub mod svg;
pub mod timeline;

pub use sprite::{Sprite, DISPLAY_HIDDEN, DISPLAY_VISIBLE};
pub use svg::{Element, Node, SVG_NAMESPACE, XLINK_NAMESPACE};
pub use timeline::{Segment, Timeline};

/// Result type for animprep-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for animprep-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
